use micromood_core::{Companion, Config};

use super::CommandResult;

pub fn run(config: &Config, name: Option<String>) -> CommandResult {
    let Some(name) = name else {
        for companion in Companion::ALL {
            let persona = companion.persona();
            let marker = if companion == config.companion.character { "*" } else { " " };
            println!(
                "{marker} {:<6} {} {} ({})",
                companion.id(),
                persona.emoji,
                persona.name,
                persona.personality
            );
        }
        return Ok(());
    };

    let companion: Companion = name.parse()?;
    let mut config = Config::load()?;
    config.set("companion.character", companion.id())?;

    let persona = companion.persona();
    println!("{} {}: {}", persona.emoji, persona.name, persona.welcome);
    Ok(())
}
