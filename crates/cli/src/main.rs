use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use tickdown_core::{Event, EventBus, GameConfig, Phase, RunState};

struct CliOptions {
    seed: u64,
    config: Option<String>,
}

fn parse_args() -> Result<CliOptions> {
    let mut options = CliOptions {
        seed: 0,
        config: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.seed = value.parse().context("--seed must be an integer")?;
            }
            "--config" => {
                options.config = Some(args.next().context("--config needs a path")?);
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }
    Ok(options)
}

fn load_config(path: Option<&str>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(GameConfig::default()),
    }
}

fn main() -> Result<()> {
    let options = parse_args()?;
    let config = load_config(options.config.as_deref())?;
    let mut events = EventBus::default();
    let mut run = RunState::new(config, options.seed);

    println!("Welcome to the Clockwork Casino. Type 'help' for commands.");
    run.start(&mut events);
    report(&mut run, &mut events);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => continue,
        };

        let outcome = match command {
            "help" | "?" => {
                print_help();
                Ok(())
            }
            "state" | "s" => {
                print_state(&run);
                Ok(())
            }
            "wait" | "w" => match parts.next().map(str::parse::<f64>) {
                Some(Ok(dt)) if dt > 0.0 => {
                    run.tick(dt, &mut events);
                    Ok(())
                }
                _ => {
                    println!("usage: wait <seconds>");
                    Ok(())
                }
            },
            "pick" | "p" => match parts.next().map(str::parse::<usize>) {
                Some(Ok(index)) => run.choose(index, &mut events).map_err(|e| e.to_string()),
                _ => {
                    println!("usage: pick <index>");
                    Ok(())
                }
            },
            "borrow" | "b" => run.borrow(&mut events).map_err(|e| e.to_string()),
            "continue" | "next" | "n" => {
                run.continue_run(&mut events).map_err(|e| e.to_string())
            }
            "cashout" => run.cash_out(&mut events).map_err(|e| e.to_string()),
            "risk" => {
                let index = parts
                    .next()
                    .and_then(|value| value.parse::<usize>().ok())
                    .unwrap_or(0);
                run.start_risk(index, &mut events).map_err(|e| e.to_string())
            }
            "risks" => {
                for (i, title) in run.risk_titles().iter().enumerate() {
                    println!("  [{i}] {title}");
                }
                Ok(())
            }
            "quit" | "exit" | "q" => break,
            other => {
                println!("unknown command: {other} (try 'help')");
                Ok(())
            }
        };
        if let Err(reason) = outcome {
            println!("rejected: {reason}");
        }

        report(&mut run, &mut events);
        if run.phase() == Phase::Ended {
            break;
        }
    }

    Ok(())
}

fn print_help() {
    println!("  state            show the table");
    println!("  wait <seconds>   let the clock run");
    println!("  pick <index>     choose a card");
    println!("  borrow           borrow time against your credit");
    println!("  continue         start the next round (intermission only)");
    println!("  cashout          walk away with your score");
    println!("  risk [n]         attempt a risk challenge (intermission only)");
    println!("  risks            list risk challenges");
    println!("  quit             leave the table");
}

fn print_state(run: &RunState) {
    let hud = run.hud();
    println!(
        "round {} | {:?} | time {}s | stake {}s | debt {}s (tomorrow {}%) | score {}s",
        hud.round,
        hud.phase,
        hud.time_seconds,
        hud.stake_seconds,
        hud.debt_seconds,
        hud.tomorrow_pct,
        hud.score_seconds,
    );
    if let Some(rule) = hud.rule_text {
        println!("rule: {rule}");
    }
    if !run.hand().is_empty() {
        print_hand(run);
        if matches!(hud.phase, Phase::RoundActive | Phase::RiskActive) {
            println!("countdown: {:.1}s", hud.countdown_seconds);
        }
    }
}

fn print_hand(run: &RunState) {
    let cards: Vec<String> = run
        .hand()
        .iter()
        .enumerate()
        .map(|(i, card)| format!("[{i}] {} of {}", card.value, card.suit.name()))
        .collect();
    println!("hand: {}", cards.join("  "));
}

/// Drain and narrate engine events. The CLI is the presentation layer, so a
/// dealt hand is "revealed" by printing it, then confirmed to the core.
fn report(run: &mut RunState, events: &mut EventBus) {
    let drained: Vec<Event> = events.drain().collect();
    for event in drained {
        match event {
            Event::RunStarted { time_bank } => {
                println!("the clock starts with {time_bank:.0}s on it");
            }
            Event::RoundStarted {
                round,
                stake,
                rule_text,
            } => {
                println!("-- round {round} (stake {stake}s) --");
                println!("rule: {rule_text}");
            }
            Event::HandDealt { count } => {
                println!("{count} cards hit the felt:");
                print_hand(run);
                if run.deal_shown().is_ok() {
                    println!("clock is running!");
                }
            }
            Event::RoundWon {
                surplus,
                paid,
                score,
                debt,
            } => {
                if paid > 0 {
                    println!("correct! {paid}s went to debt, {surplus}s to score");
                } else {
                    println!("correct! +{surplus}s score");
                }
                println!("score {score}s, debt {debt}s");
            }
            Event::RoundLost {
                stake,
                debt,
                timed_out,
            } => {
                let why = if timed_out { "too slow" } else { "wrong card" };
                println!("{why}! debt +{stake}s (now {debt}s)");
            }
            Event::IntermissionStarted { round } => {
                println!("-- intermission after round {round} --");
                println!("borrow, cashout, risk, or continue");
            }
            Event::ContinueBlocked { needed } => {
                println!("not enough time to continue (need {needed}s); borrow or cash out");
            }
            Event::Borrowed {
                seconds,
                debt,
                credit_left,
            } => {
                println!("borrowed +{seconds}s (debt {debt}s, credit left {credit_left}s)");
            }
            Event::RiskStarted { title, time_budget } => {
                println!("risk: {title} ({time_budget:.0}s on the clock)");
            }
            Event::RiskWon { score } => {
                println!("double or nothing pays: score {score}s");
            }
            Event::RiskDegenerate { title } => {
                println!("warning: risk challenge '{title}' has no correct answer");
            }
            Event::RunEnded { busted, score, debt } => {
                if busted {
                    println!("BUST. debt remained: {debt}s. final score: {score}s");
                } else {
                    println!("clean finish. final score: {score}s");
                }
            }
        }
    }
}
