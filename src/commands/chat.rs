//! Interactive chat mode handler
//!
//! Instantiates the provider and dataset, creates a `ChatSession`, and
//! runs a readline-based loop that submits user input and renders the
//! streamed reply progressively.

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::providers::create_provider;
use crate::session::{ChatSession, SubmitOutcome};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// In-REPL commands recognized before text goes to the assistant.
enum SpecialCommand {
    /// `/dish <name>`: switch the grounding context to another dish
    SwitchDish(String),
    /// `/recipe`: print the active recipe
    ShowRecipe,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Exit,
    /// Not a special command; send to the assistant
    None,
}

fn parse_special_command(input: &str) -> SpecialCommand {
    if let Some(rest) = input.strip_prefix("/dish ") {
        return SpecialCommand::SwitchDish(rest.trim().to_string());
    }
    match input {
        "/recipe" => SpecialCommand::ShowRecipe,
        "/help" => SpecialCommand::Help,
        "/quit" | "/exit" => SpecialCommand::Exit,
        _ => SpecialCommand::None,
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /dish <name>   Ground the chat in another dish from the dataset");
    println!("  /recipe        Show the active recipe");
    println!("  /help          Show this help");
    println!("  /quit          Leave the chat");
    println!();
}

fn print_recipe(session: &ChatSession) {
    let context = session.context();
    println!("\n{}", context.name.bold().green());
    println!("{}", "Ingredients:".bold());
    for line in context.ingredient_lines() {
        println!("  - {}", line);
    }
    println!("{}", "Instructions:".bold());
    println!("{}\n", context.instructions);
}

/// Starts interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `dish` - Optional dish name to ground the conversation in
pub async fn run_chat(config: Config, dish: Option<String>) -> Result<()> {
    tracing::info!("Starting interactive chat mode");

    let dataset = Dataset::load(&config.dataset.path)?;
    let provider = create_provider(&config.provider)?;
    let mut session = ChatSession::new(provider, config.chat.greeting.clone());

    if let Some(name) = dish {
        let context = dataset.select_dish(&name)?;
        if context.is_empty() {
            println!(
                "{}",
                format!("No dish named '{}' in the dataset; starting ungrounded.", name).yellow()
            );
        }
        session.set_context(context);
    }

    run_repl(&mut session, Some(&dataset))
        .await
}

/// Runs the readline loop for an already-prepared session
///
/// The `dataset` is optional: the video chat flow has no dataset-backed
/// dish switching.
pub async fn run_repl(session: &mut ChatSession, dataset: Option<&Dataset>) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    // The seeded greeting is the first visible turn.
    if let Some(greeting) = session.transcript().first() {
        println!("\n{}\n", greeting.content.green());
    }

    loop {
        match rl.readline(&"you >> ".cyan().to_string()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_special_command(trimmed) {
                    SpecialCommand::SwitchDish(name) => {
                        match dataset {
                            Some(dataset) => {
                                let context = dataset.select_dish(&name)?;
                                if context.is_empty() {
                                    println!(
                                        "{}",
                                        format!("No dish named '{}' in the dataset.", name)
                                            .yellow()
                                    );
                                } else {
                                    session.set_context(context);
                                    if let Some(greeting) = session.transcript().first() {
                                        println!("\n{}\n", greeting.content.green());
                                    }
                                }
                            }
                            None => {
                                println!(
                                    "{}",
                                    "Dish switching is not available in video chat.".yellow()
                                );
                            }
                        }
                        continue;
                    }
                    SpecialCommand::ShowRecipe => {
                        print_recipe(session);
                        continue;
                    }
                    SpecialCommand::Help => {
                        print_help();
                        continue;
                    }
                    SpecialCommand::Exit => break,
                    SpecialCommand::None => {}
                }

                rl.add_history_entry(trimmed)?;

                print!("{}", "chef >> ".green());
                std::io::stdout().flush()?;

                let outcome = session
                    .submit(trimmed, |chunk| {
                        print!("{}", chunk);
                        let _ = std::io::stdout().flush();
                    })
                    .await?;

                match outcome {
                    SubmitOutcome::Committed(_) => println!("\n"),
                    SubmitOutcome::RolledBack(description) => {
                        println!();
                        eprintln!(
                            "{}",
                            format!("Error: {}. Your message was not sent; try again.", description)
                                .red()
                        );
                    }
                    SubmitOutcome::Ignored => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(e) => {
                eprintln!("{}", format!("Readline error: {}", e).red());
                break;
            }
        }
    }

    println!("{}", "Happy cooking!".green());
    Ok(())
}
