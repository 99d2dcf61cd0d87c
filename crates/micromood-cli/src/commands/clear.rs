use micromood_core::Config;

use super::{open_journal, CommandResult};

pub fn run(config: &Config, yes: bool) -> CommandResult {
    let mut journal = open_journal(config)?;
    let request = journal.request_clear();

    if !yes {
        println!(
            "This would delete {} mood entries. Re-run with --yes to confirm.",
            request.entries()
        );
        return Ok(());
    }

    let removed = journal.clear(request.acknowledge())?;
    println!("All data cleared successfully! ({removed} entries removed)");
    Ok(())
}
