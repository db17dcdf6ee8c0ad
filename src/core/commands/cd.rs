use super::{Command, CommandContext, CommandError};
use crate::path::PathExpander;

#[derive(Clone, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

/// Drops a leading `/d` switch (cmd's "also change drive"), which is implied here.
fn strip_drive_switch(args: &str) -> &str {
    let Some(head) = args.get(..2) else {
        return args;
    };
    let rest = &args[2..];
    let switch_ends = rest.is_empty() || rest.starts_with(char::is_whitespace);
    if head.eq_ignore_ascii_case("/d") && switch_ends {
        rest.trim_start()
    } else {
        args
    }
}

fn strip_quotes(arg: &str) -> &str {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn help(&self) -> &'static str {
        "Change the current directory. (cd [path])"
    }

    fn execute(&self, args: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
        let target = strip_quotes(strip_drive_switch(args.trim()));

        if target.is_empty() {
            writeln!(ctx.streams.out, "{}", ctx.state.cwd().display())?;
            return Ok(0);
        }

        let resolved = self.path_expander.resolve(ctx.state.cwd(), target)?;
        ctx.state.set_cwd(resolved)?;
        Ok(0)
    }
}
