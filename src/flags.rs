use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        let table = [
            ("help", "-h", "--help", "Print this help message", false),
            ("version", "-v", "--version", "Show version", false),
            ("config", "-c", "--config", "Startup script path", true),
            ("norc", "-n", "--norc", "Skip the startup script", false),
            ("shell", "-s", "--shell", "Child shell program", true),
            ("quiet", "-q", "--quiet", "Suppress the banner", false),
            ("debug", "-d", "--debug", "Enable debug logging", false),
        ];

        for (name, short, long, description, takes_value) in table {
            flags.insert(
                name.to_string(),
                Flag {
                    short: short.to_string(),
                    long: long.to_string(),
                    description: description.to_string(),
                    takes_value,
                    value: None,
                },
            );
        }

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("Unknown flag {}", arg)))?;

            if flag.takes_value {
                match args.get(i + 1) {
                    Some(value) => {
                        flag.value = Some(value.clone());
                        i += 1;
                    }
                    None => {
                        return Err(ShellError::FlagError(format!(
                            "Flag {} requires a value",
                            arg
                        )))
                    }
                }
            } else {
                flag.value = Some("true".to_string());
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: pseudocmd [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} <value>", flag.long)
            } else {
                flag.long.clone()
            };
            println!("  {}, {:<18} {}", flag.short, long, flag.description);
        }
    }
}
