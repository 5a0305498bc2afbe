// Line commands understood by the interactive loop.
// Friends are addressed by their 1-based position in the printed list.

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bill(String),
    Tip(String),
    Add(String),
    Expense { index: usize, raw: String },
    Delete { index: usize },
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_lowercase().as_str() {
            "bill" | "b" => Command::Bill(rest.to_string()),
            "tip" | "t" => Command::Tip(rest.to_string()),
            "add" | "a" => Command::Add(rest.to_string()),
            "expense" | "extra" | "e" => Self::parse_expense(rest),
            "delete" | "del" | "rm" => match parse_index(rest) {
                Some(index) => Command::Delete { index },
                None => Command::Unknown("usage: delete <friend #>".to_string()),
            },
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(format!("unknown command '{}', type 'help'", other)),
        };
        Some(command)
    }

    fn parse_expense(rest: &str) -> Command {
        let (index, raw) = match rest.split_once(char::is_whitespace) {
            Some((index, raw)) => (index, raw.trim()),
            None => (rest, ""),
        };
        match parse_index(index) {
            Some(index) => Command::Expense { index, raw: raw.to_string() },
            None => Command::Unknown("usage: expense <friend #> <amount>".to_string()),
        }
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.trim().trim_start_matches('#').parse::<usize>().ok().filter(|index| *index > 0)
}

pub fn help_text(tip_presets: &[f64], max_tip: f64) -> String {
    let presets: Vec<String> = tip_presets.iter().map(|p| format!("{}%", p)).collect();
    format!(
        "Commands:\n\
         \x20 bill <amount>              set the total bill\n\
         \x20 tip <percent>              set the tip (0-{max}%, common: {presets})\n\
         \x20 add <name>                 add a friend\n\
         \x20 expense <friend #> <amount> set a friend's extra expense\n\
         \x20 delete <friend #>          remove a friend\n\
         \x20 show                       print the split\n\
         \x20 help                       this text\n\
         \x20 quit                       leave (everything is already saved)\n",
        max = max_tip,
        presets = presets.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_parse_bill_and_tip_keep_raw_text() {
        assert_eq!(Command::parse("bill 100"), Some(Command::Bill("100".to_string())));
        assert_eq!(Command::parse("bill"), Some(Command::Bill(String::new())));
        assert_eq!(Command::parse("TIP  15 "), Some(Command::Tip("15".to_string())));
        assert_eq!(Command::parse("tip abc"), Some(Command::Tip("abc".to_string())));
    }

    #[test]
    fn test_parse_add_keeps_spaces_in_name() {
        assert_eq!(Command::parse("add Mary Ann"), Some(Command::Add("Mary Ann".to_string())));
        assert_eq!(Command::parse("add"), Some(Command::Add(String::new())));
    }

    #[test]
    fn test_parse_expense() {
        assert_eq!(
            Command::parse("expense 2 12.50"),
            Some(Command::Expense { index: 2, raw: "12.50".to_string() })
        );
        assert_eq!(
            Command::parse("e #1"),
            Some(Command::Expense { index: 1, raw: String::new() })
        );
        assert!(matches!(Command::parse("expense x 5"), Some(Command::Unknown(_))));
        assert!(matches!(Command::parse("expense 0 5"), Some(Command::Unknown(_))));
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(Command::parse("delete 3"), Some(Command::Delete { index: 3 }));
        assert_eq!(Command::parse("rm #1"), Some(Command::Delete { index: 1 }));
        assert!(matches!(Command::parse("delete"), Some(Command::Unknown(_))));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(Command::parse("show"), Some(Command::Show));
        assert_eq!(Command::parse("?"), Some(Command::Help));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert!(matches!(Command::parse("split"), Some(Command::Unknown(msg)) if msg.contains("split")));
    }

    #[test]
    fn test_help_lists_presets() {
        let help = help_text(&[0.0, 10.0, 15.0, 20.0], 30.0);
        assert!(help.contains("0%, 10%, 15%, 20%"));
        assert!(help.contains("0-30%"));
    }
}
