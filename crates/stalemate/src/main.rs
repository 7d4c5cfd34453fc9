use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let verdict = stalemate_lib::main()?;
    Ok(ExitCode::from(verdict.exit_code()))
}
