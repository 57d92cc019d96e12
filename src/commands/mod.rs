pub mod create;

pub type CmdResult<T> = projclone::Result<(T, i32)>;

/// Dispatch a parsed command and flatten its output into the JSON envelope.
pub fn run_json(command: crate::Commands) -> (projclone::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Create(args) => {
            crate::output::map_cmd_result_to_json(create::run_json(args))
        }
    }
}
