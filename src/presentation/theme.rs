use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub value: fn(&str) -> String,
    pub detected: fn(&str) -> String,
    pub error: fn(&str) -> String,
    pub line: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" | "" => Self::plain(),
            "ocean" => Self::ocean(),
            "mono" => Self::mono(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::plain() // Fallback to default
            }
        }
    }

    fn plain() -> Self {
        Self {
            title: |s| s.bright_white().bold().to_string(),
            label: |s| s.cyan().to_string(),
            value: |s| s.white().to_string(),
            detected: |s| s.green().italic().to_string(),
            error: |s| s.red().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
        }
    }

    fn ocean() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            label: |s| s.bright_cyan().to_string(),
            value: |s| s.bright_white().to_string(),
            detected: |s| s.bright_green().italic().to_string(),
            error: |s| s.bright_red().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            title: |s| s.bold().to_string(),
            label: |s| s.normal().to_string(),
            value: |s| s.normal().to_string(),
            detected: |s| s.italic().to_string(),
            error: |s| s.bold().to_string(),
            line: |s| s.dimmed().to_string(),
        }
    }
}
