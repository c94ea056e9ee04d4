//! WhatsApp-ready text for the day's break orders.
//!
//! Service breaks start half an hour before technical ones, so the service
//! list comes first. The period is decided from a wall-clock time the caller
//! passes in.

use chrono::{NaiveTime, Timelike};

use crate::order::BreakOrder;

/// Which break round a message announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPeriod {
    Morning,
    Afternoon,
}

impl BreakPeriod {
    /// 09:00-11:59 is morning, 12:00-17:00 afternoon. Anything else is
    /// treated as morning, the next round to be announced.
    pub fn at(time: NaiveTime) -> Self {
        let minutes = time.hour() * 60 + time.minute();
        match minutes {
            540..=719 => BreakPeriod::Morning,
            720..=1020 => BreakPeriod::Afternoon,
            _ => BreakPeriod::Morning,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            BreakPeriod::Morning => "🌅 הפסקות בוקר",
            BreakPeriod::Afternoon => "🌞 הפסקות צהריים",
        }
    }

    fn service_start(self) -> &'static str {
        match self {
            BreakPeriod::Morning => "09:30",
            BreakPeriod::Afternoon => "12:30",
        }
    }

    fn technical_start(self) -> &'static str {
        match self {
            BreakPeriod::Morning => "10:00",
            BreakPeriod::Afternoon => "13:00",
        }
    }
}

impl std::fmt::Display for BreakPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakPeriod::Morning => write!(f, "morning"),
            BreakPeriod::Afternoon => write!(f, "afternoon"),
        }
    }
}

/// Render both orders as a numbered message. Groups with an empty order are
/// left out.
pub fn format_for_whatsapp(
    technical: &BreakOrder,
    service: &BreakOrder,
    period: BreakPeriod,
) -> String {
    let mut sections = vec![period.heading().to_string()];

    if !service.is_empty() {
        sections.push(section(
            &format!("📞 הפסקות שירות החל מ־{}:", period.service_start()),
            service,
        ));
    }
    if !technical.is_empty() {
        sections.push(section(
            &format!("🔧 הפסקות טכני החל מ־{}:", period.technical_start()),
            technical,
        ));
    }

    sections.join("\n\n").trim().to_string()
}

fn section(title: &str, order: &BreakOrder) -> String {
    let mut lines = vec![title.to_string()];
    lines.extend(
        order
            .iter()
            .enumerate()
            .map(|(i, worker)| format!("{}. {}", i + 1, worker.name)),
    );
    lines.join("\n")
}
