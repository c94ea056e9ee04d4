//! breaks CLI: roster management and break-order shuffling.

use break_shuffle::board::Board;
use break_shuffle::config::Config;
use break_shuffle::defaults::{builtin_roster, load_roster_file};
use break_shuffle::export::BreakPeriod;
use break_shuffle::model::{Group, NewWorker, WorkerId};
use break_shuffle::telemetry::{TelemetryConfig, init_telemetry};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "breaks", about = "Shuffle break orders for the technical and service groups")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the roster
    List,
    /// Add a worker (active today, unlocked)
    Add {
        /// Display name
        name: String,
        /// technical or service
        #[arg(long, short)]
        group: Group,
        /// Add as not working today
        #[arg(long)]
        inactive: bool,
    },
    /// Remove a worker
    Remove { id: WorkerId },
    /// Toggle whether a worker takes a break today
    ToggleActive { id: WorkerId },
    /// Toggle a worker's position lock.
    ///
    /// Orders are not kept between runs, so every `shuffle` starts from
    /// roster order: a locked worker keeps their place among today's active
    /// workers of their group in roster order, not the place the last
    /// `shuffle` printed.
    Lock { id: WorkerId },
    /// Shuffle break orders and print them
    Shuffle {
        /// Only shuffle this group
        #[arg(long, short)]
        group: Option<Group>,
        /// Print the WhatsApp message instead of tables
        #[arg(long)]
        export: bool,
        /// Wall-clock time deciding morning/afternoon (HH:MM, default now)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
    },
    /// Shuffle both groups and print the WhatsApp message
    Export {
        /// Wall-clock time deciding morning/afternoon (HH:MM, default now)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
    },
    /// Forget the stored roster and restore the defaults
    Reset,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_telemetry(TelemetryConfig {
        log_level: config.log_level.clone(),
    })?;

    let mut board = Board::from_config(&config)?;

    match cli.command {
        Command::List => cmd_list(&board),
        Command::Add {
            name,
            group,
            inactive,
        } => {
            let worker = board.add_worker(NewWorker::new(name, group).active_today(!inactive))?;
            println!("Added: #{} {} ({})", worker.id, worker.name, worker.group);
            Ok(())
        }
        Command::Remove { id } => {
            let worker = board.remove_worker(id)?;
            println!("Removed: #{} {}", worker.id, worker.name);
            Ok(())
        }
        Command::ToggleActive { id } => {
            let active = board.toggle_active(id)?;
            println!(
                "#{id} is {}",
                if active { "working today" } else { "off today" }
            );
            Ok(())
        }
        Command::Lock { id } => {
            let group = board.roster().get(id)?.group;
            board.begin_editing(group);
            let locked = board.toggle_lock(id)?;
            board.finish_editing(group);
            println!("{}", lock_message(&board, id, locked));
            Ok(())
        }
        Command::Shuffle { group, export, at } => {
            if !board.roster().has_active() {
                anyhow::bail!("nobody is working today");
            }
            match group {
                Some(group) => {
                    board.shuffle(group);
                }
                None => board.shuffle_all(),
            }
            if export {
                println!("{}", board.export(period(at))?);
            } else {
                for group in Group::ALL {
                    print_order(&board, group);
                }
            }
            Ok(())
        }
        Command::Export { at } => {
            if !board.roster().has_active() {
                anyhow::bail!("nobody is working today");
            }
            board.shuffle_all();
            println!("{}", board.export(period(at))?);
            Ok(())
        }
        Command::Reset => {
            let default = match &config.roster_file {
                Some(path) => load_roster_file(path)?,
                None => builtin_roster(),
            };
            board.reset_roster(default)?;
            println!("Roster reset ({} workers)", board.roster().len());
            Ok(())
        }
    }
}

/// Where a lock will hold the worker, in roster terms.
fn lock_message(board: &Board, id: WorkerId, locked: bool) -> String {
    if !locked {
        return format!("#{id} is unlocked");
    }
    let Ok(worker) = board.roster().get(id) else {
        return format!("#{id} is locked");
    };
    match board.display_order(worker.group).position(id) {
        Some(index) => format!(
            "#{id} is locked at place {} of the {} roster order for the next shuffle",
            index + 1,
            worker.group
        ),
        None => format!("#{id} is locked (off today, so not in the {} order)", worker.group),
    }
}

fn period(at: Option<NaiveTime>) -> BreakPeriod {
    BreakPeriod::at(at.unwrap_or_else(|| chrono::Local::now().time()))
}

fn cmd_list(board: &Board) -> anyhow::Result<()> {
    if board.roster().is_empty() {
        println!("No workers.");
        return Ok(());
    }

    println!("{:<4}  {:<20}  {:<10}  {:<6}  LOCKED", "ID", "NAME", "GROUP", "TODAY");
    println!("{}", "-".repeat(56));
    for worker in board.roster().workers() {
        println!(
            "{:<4}  {:<20}  {:<10}  {:<6}  {}",
            worker.id,
            worker.name,
            worker.group,
            if worker.active_today { "yes" } else { "no" },
            if worker.locked { "yes" } else { "-" },
        );
    }
    println!("\n{} worker(s)", board.roster().len());
    Ok(())
}

fn print_order(board: &Board, group: Group) {
    let order = board.display_order(group);
    println!("{group}:");
    if order.is_empty() {
        println!("  (nobody today)");
    }
    for (i, worker) in order.iter().enumerate() {
        let lock = if worker.locked { " [locked]" } else { "" };
        println!("  {}. {}{lock}", i + 1, worker.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use break_shuffle::config::RosterPolicy;
    use break_shuffle::roster::Roster;

    fn board() -> Board {
        let mut roster = Roster::empty();
        for name in ["Avi", "Vlad", "Dima"] {
            roster.add(NewWorker::new(name, Group::Technical)).unwrap();
        }
        roster
            .add(NewWorker::new("Chen", Group::Technical).active_today(false))
            .unwrap();
        Board::in_memory(roster, RosterPolicy::Splice).unwrap()
    }

    #[test]
    fn lock_message_names_roster_place() {
        let board = board();
        assert_eq!(
            lock_message(&board, WorkerId(2), true),
            "#2 is locked at place 2 of the technical roster order for the next shuffle"
        );
        assert_eq!(lock_message(&board, WorkerId(2), false), "#2 is unlocked");
    }

    #[test]
    fn lock_message_for_inactive_worker() {
        let board = board();
        assert_eq!(
            lock_message(&board, WorkerId(4), true),
            "#4 is locked (off today, so not in the technical order)"
        );
    }
}
