use crate::problem::{Checked, Verdict};
use agari::hand::tiles_to_string;
use agari::{Decomposition, Form, Tile};
use console::style;
use std::fmt::Write;

fn form_label(form: Form) -> &'static str {
    match form {
        Form::Standard => "standard",
        Form::SevenPairs => "seven pairs",
        Form::ThirteenOrphans => "thirteen orphans",
    }
}

/// One line per reading, headed by the hand itself.
pub fn readings_to_string(hand: &[Tile], winning_tile: Tile, readings: &[Decomposition]) -> String {
    let mut ret = format!(
        "{} + {}",
        style(tiles_to_string(hand)).bold(),
        style(winning_tile).yellow().bold(),
    );
    if let Some(name) = winning_tile.honor_name() {
        let _ = write!(ret, " ({name})");
    }
    ret.push('\n');
    if readings.is_empty() {
        let _ = writeln!(ret, "{}", style("not a winning shape").red());
        return ret;
    }

    for (i, reading) in readings.iter().enumerate() {
        let groups = match reading.form {
            Form::ThirteenOrphans => String::new(),
            _ => reading.groups.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
        };
        let wait = reading.wait.map_or_else(|| "-".to_owned(), |w| w.to_string());
        let _ = writeln!(
            ret,
            "{:>2}. {:<16} {:<8} {groups}",
            i + 1,
            style(form_label(reading.form)).cyan(),
            style(wait).green(),
        );
    }
    ret
}

/// Summary of a verify run, listing only the problems that need attention.
pub fn verdicts_to_string(checked: &[Checked]) -> String {
    let mut ret = String::new();
    let mut bad = 0;
    for c in checked {
        let line = match &c.verdict {
            Verdict::Ok { .. } => continue,
            Verdict::NotWinning => format!("{}: {}", c.id, style("not a winning shape").red()),
            Verdict::Invalid { reason } => format!("{}: {} {reason}", c.id, style("invalid").red().bold()),
        };
        bad += 1;
        ret.push_str(&line);
        ret.push('\n');
    }

    let summary = format!("{}/{} problems ok", checked.len() - bad, checked.len());
    let summary = if bad == 0 {
        style(summary).green()
    } else {
        style(summary).yellow()
    };
    let _ = writeln!(ret, "{summary}");
    ret
}

#[cfg(test)]
mod test {
    use super::*;
    use agari::analyze;
    use agari::hand::{parse_tile, parse_tiles};

    #[test]
    fn readings() {
        console::set_colors_enabled(false);
        let hand = parse_tiles("11112233m 456p 789s").unwrap();
        let win = parse_tile("1m").unwrap();
        let readings = analyze(&hand, win).unwrap();
        let report = readings_to_string(&hand, win, &readings);

        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "11112233m 456p 789s + 1m");
        assert!(lines[1].contains("tanki"));
        assert!(lines[2].contains("ryanmen"));
        assert!(lines[2].ends_with("(11m) [123m] [123m] [456p] [789s]"));

        let hand = parse_tiles("19m 19p 19s 1234567z 7z").unwrap();
        let win = parse_tile("7z").unwrap();
        let readings = analyze(&hand, win).unwrap();
        let report = readings_to_string(&hand, win, &readings);
        assert!(report.starts_with("19m 19p 19s 12345677z + 7z (Red)\n"));
        assert!(report.contains("thirteen orphans"));

        let hand = parse_tiles("135m 246p 135s 12345z").unwrap();
        let report = readings_to_string(&hand, hand[0], &[]);
        assert!(report.contains("not a winning shape"));
    }

    #[test]
    fn verdicts() {
        console::set_colors_enabled(false);
        let checked = [
            Checked {
                id: "a".to_owned(),
                verdict: Verdict::Ok { readings: 2 },
            },
            Checked {
                id: "b".to_owned(),
                verdict: Verdict::NotWinning,
            },
        ];
        assert_eq!(
            verdicts_to_string(&checked),
            "b: not a winning shape\n1/2 problems ok\n"
        );
    }
}
