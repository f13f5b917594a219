use chrono::{DateTime, Utc};
use colored::Colorize;
use parkade::api::{CmdMessage, MessageLevel};
use parkade::model::{Occupancy, SpaceStatus};
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const KIND_WIDTH: usize = 6;
const REGISTRATION_WIDTH: usize = 14;
const FREE_LABEL: &str = "free";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_status(spaces: &[SpaceStatus], occupancy: Option<Occupancy>) {
    print!("{}", render_status(spaces, occupancy, Utc::now()));
}

pub(super) fn print_settings(entries: &[(&str, String)]) {
    print!("{}", render_settings(entries));
}

/// One line per space, followed by an occupancy summary.
pub(super) fn render_status(
    spaces: &[SpaceStatus],
    occupancy: Option<Occupancy>,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    if spaces.is_empty() {
        out.push_str("No spaces match.\n");
    }

    let index_width = spaces
        .iter()
        .map(|s| s.index.to_string().len())
        .max()
        .unwrap_or(1);

    for space in spaces {
        let idx = format!("{:>width$}.", space.index, width = index_width);
        match &space.occupant {
            Some(vehicle) => {
                let registration = vehicle.registration.as_str();
                let reg_pad = REGISTRATION_WIDTH.saturating_sub(registration.width());
                out.push_str(&format!(
                    "  {} {:<kind$}{}{}{}\n",
                    idx.yellow(),
                    vehicle.kind.code(),
                    registration.bold(),
                    " ".repeat(reg_pad),
                    format!("parked {}", format_time_ago(vehicle.arrived_at, now)).dimmed(),
                    kind = KIND_WIDTH,
                ));
            }
            None => {
                out.push_str(&format!("  {} {}\n", idx, FREE_LABEL.dimmed()));
            }
        }
    }

    if let Some(occupancy) = occupancy {
        let summary = format!(
            "{} of {} spaces occupied, {} free",
            occupancy.occupied,
            occupancy.capacity,
            occupancy.free()
        );
        out.push('\n');
        if occupancy.is_full() {
            out.push_str(&format!("{}\n", summary.yellow()));
        } else {
            out.push_str(&format!("{}\n", summary));
        }
    }

    out
}

pub(super) fn render_settings(entries: &[(&str, String)]) -> String {
    let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    entries
        .iter()
        .map(|(key, value)| format!("{:<width$}  {}\n", key, value, width = key_width))
        .collect()
}

fn format_time_ago(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(since);
    Formatter::new().convert(elapsed.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use parkade::model::{Registration, Vehicle, VehicleKind};

    fn occupied(index: usize, kind: VehicleKind, reg: &str, at: DateTime<Utc>) -> SpaceStatus {
        SpaceStatus {
            index,
            occupant: Some(Vehicle::new(Registration::parse(reg).unwrap(), kind, at)),
        }
    }

    fn free(index: usize) -> SpaceStatus {
        SpaceStatus {
            index,
            occupant: None,
        }
    }

    #[test]
    fn status_lists_every_space_with_summary() {
        colored::control::set_override(false);
        let now = Utc::now();
        let spaces = vec![
            occupied(0, VehicleKind::Motorcycle, "mc1", now - TimeDelta::hours(2)),
            free(1),
        ];
        let out = render_status(
            &spaces,
            Some(Occupancy {
                capacity: 2,
                occupied: 1,
            }),
            now,
        );

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("  0. MC    MC1"));
        assert!(lines[0].ends_with("parked 2 hours ago"));
        assert_eq!(lines[1], "  1. free");
        assert_eq!(lines[3], "1 of 2 spaces occupied, 1 free");
    }

    #[test]
    fn indexes_are_right_aligned() {
        colored::control::set_override(false);
        let spaces = vec![free(9), free(10)];
        let out = render_status(&spaces, None, Utc::now());
        assert_eq!(out, "   9. free\n  10. free\n");
    }

    #[test]
    fn empty_filter_result_says_so() {
        colored::control::set_override(false);
        let out = render_status(&[], None, Utc::now());
        assert_eq!(out, "No spaces match.\n");
    }

    #[test]
    fn settings_are_aligned() {
        let entries = vec![("spaces", "10".to_string()), ("currency", "SEK".to_string())];
        assert_eq!(
            render_settings(&entries),
            "spaces    10\ncurrency  SEK\n"
        );
    }
}
