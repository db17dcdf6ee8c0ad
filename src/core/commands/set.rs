use super::{Command, CommandContext, CommandError};
use crate::core::env::{merged, EnvSnapshot};

#[derive(Clone, Default)]
pub struct SetCommand;

impl SetCommand {
    pub fn new() -> Self {
        Self
    }
}

fn list(snapshot: &EnvSnapshot, ctx: &mut CommandContext) -> Result<i32, CommandError> {
    for (name, value) in merged(snapshot, ctx.state.env()) {
        writeln!(ctx.streams.out, "{}={}", name, value)?;
    }
    Ok(0)
}

// Inherited variables are only visible to the child, so ask it.
fn query(name: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
    let query = ctx.runner.dialect().query_variable(name);
    Ok(ctx.runner.execute(ctx.state, &query, ctx.streams)?)
}

impl Command for SetCommand {
    fn name(&self) -> &'static str {
        "set"
    }

    fn help(&self) -> &'static str {
        "Set or show environment variables. (set [name[=value]])"
    }

    fn execute(&self, args: &str, ctx: &mut CommandContext) -> Result<i32, CommandError> {
        let args = args.trim();
        if args.is_empty() {
            return list(&EnvSnapshot::capture(), ctx);
        }

        let Some((name, value)) = args.split_once('=') else {
            return query(args, ctx);
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(CommandError::InvalidSyntax);
        }

        ctx.state.env_mut().set(name, value);
        Ok(0)
    }
}
