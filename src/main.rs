// src/main.rs
// Terminal front end: guided card entry driving the state machine, with an
// advisor call at every analysis stop.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use holdem_advisor::advisor;
use holdem_advisor::cards::{suits_of_color, Card, Color, Value, ALL_VALUES};
use holdem_advisor::poker::{GamePhase, GameState};
use holdem_advisor::providers;
use holdem_advisor::verdict::HandVerdict;

const USAGE: &str = "\
holdem-advisor - guided Texas Hold'em hand analysis

USAGE:
  holdem-advisor                     interactive card entry
  holdem-advisor --hand CARDS...     one-shot analysis; first two codes are the
                                     hole cards, the rest the board (e.g.
                                     --hand Ah Kh Qh Jh Th)
  holdem-advisor --providers         list strategy providers enabled by the
                                     current environment
";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("holdem_advisor=warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => run_interactive().await,
        Some("--providers") => {
            list_providers();
            Ok(())
        }
        Some("--hand") => run_one_shot(&args[1..]).await,
        Some("--help" | "-h") => {
            print!("{}", USAGE);
            Ok(())
        }
        Some(other) => bail!("unknown argument {:?}\n\n{}", other, USAGE),
    }
}

fn list_providers() {
    println!("Strategy providers, best first:");
    for provider in providers::available_providers() {
        println!("  - {}", provider.name());
    }
}

async fn run_one_shot(codes: &[String]) -> Result<()> {
    if codes.len() < 2 {
        bail!("--hand needs at least two card codes\n\n{}", USAGE);
    }
    let cards: Vec<Card> = codes
        .iter()
        .map(|c| c.parse::<Card>().with_context(|| format!("bad card code {:?}", c)))
        .collect::<Result<_>>()?;

    let (hole, community) = cards.split_at(2);
    match advisor::analyze_hand(hole, community).await {
        Ok(verdict) => {
            print_verdict(hole, community, &verdict);
            Ok(())
        }
        Err(err) => bail!("{}", err),
    }
}

async fn run_interactive() -> Result<()> {
    println!("holdem-advisor - enter your hand one card at a time.");
    println!("Commands: [x] reset hand, [q] quit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = GameState::new();

    loop {
        if state.wants_analysis() {
            show_analysis(&state).await;

            if state.phase() == GamePhase::RiverAnalysis || state.phase() == GamePhase::Analysis {
                match ask(&mut lines, "\n[n]ew hand or [q]uit? ")?.as_str() {
                    "q" => return Ok(()),
                    _ => {
                        state = state.reset();
                        continue;
                    }
                }
            }

            match ask(&mut lines, "\n[enter] continue, [x] reset, [q] quit: ")?.as_str() {
                "q" => return Ok(()),
                "x" => state = state.reset(),
                _ => match state.advance() {
                    Ok(next) => state = next,
                    Err(err) => println!("{}", err),
                },
            }
            continue;
        }

        show_table(&state);
        let (position, total) = state.picking_position();
        let target = state.target().label();

        let next = match state.phase() {
            GamePhase::ColorSelection => {
                let answer = ask(
                    &mut lines,
                    &format!("{} card {}/{} - color [r]ed or [b]lack: ", target, position, total),
                )?;
                match answer.as_str() {
                    "q" => return Ok(()),
                    "x" => {
                        state = state.reset();
                        continue;
                    }
                    "r" => state.select_color(Color::Red),
                    "b" => state.select_color(Color::Black),
                    _ => {
                        println!("Please answer r or b.");
                        continue;
                    }
                }
            }
            GamePhase::SuitSelection => {
                let color = state
                    .selected_color()
                    .expect("suit selection always follows a color");
                let [first, second] = suits_of_color(color);
                let answer = ask(
                    &mut lines,
                    &format!(
                        "suit - [1] {} {} or [2] {} {} ([z] back): ",
                        first.symbol(),
                        first.name(),
                        second.symbol(),
                        second.name()
                    ),
                )?;
                match answer.as_str() {
                    "q" => return Ok(()),
                    "x" => {
                        state = state.reset();
                        continue;
                    }
                    "z" => state.back(),
                    "1" => state.select_suit(first),
                    "2" => state.select_suit(second),
                    _ => {
                        println!("Please answer 1 or 2.");
                        continue;
                    }
                }
            }
            GamePhase::ValueSelection => {
                let answer = ask(&mut lines, "value (A 2-10 J Q K, [z] back): ")?;
                match answer.as_str() {
                    "q" => return Ok(()),
                    "x" => {
                        state = state.reset();
                        continue;
                    }
                    "z" => state.back(),
                    other => match parse_value(other) {
                        Some(value) => state.select_value(value),
                        None => {
                            println!("Unrecognized value {:?}.", other);
                            continue;
                        }
                    },
                }
            }
            // Analysis phases are handled above.
            _ => unreachable!("analysis phases never reach the picker"),
        };

        match next {
            Ok(updated) => state = updated,
            Err(err) => println!("{}", err),
        }
    }
}

async fn show_analysis(state: &GameState) {
    let hole = state.cards().hole();
    let community = state.cards().community();

    println!("\n--- {} analysis ---", stage_name(state.phase()));
    match advisor::analyze_hand(hole, community).await {
        Ok(verdict) => print_verdict(hole, community, &verdict),
        // Validation failures cannot happen from the guided flow; anything
        // else still must not crash the session.
        Err(err) => println!("{}", err),
    }
}

fn stage_name(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::HoleCardsComplete => "pre-flop",
        GamePhase::FlopAnalysis => "flop",
        GamePhase::TurnAnalysis => "turn",
        GamePhase::RiverAnalysis => "river",
        _ => "hand",
    }
}

fn show_table(state: &GameState) {
    let cards = state.cards();
    if cards.total() == 0 {
        return;
    }
    let join = |cards: &[Card]| {
        cards
            .iter()
            .map(Card::label)
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!(
        "\nhole: [{}]  board: [{}]",
        join(cards.hole()),
        join(cards.community())
    );
}

fn print_verdict(hole: &[Card], community: &[Card], verdict: &HandVerdict) {
    let join = |cards: &[Card]| {
        cards
            .iter()
            .map(Card::label)
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!("hand:           {} | {}", join(hole), join(community));
    println!("strength:       {}", verdict.hand_strength);
    println!("recommendation: {}", verdict.recommendation);
    println!("confidence:     {}%", verdict.confidence);
    println!("win chance:     {}%", verdict.win_probability);
    println!("reasoning:      {}", verdict.reasoning);
}

fn ask(lines: &mut impl Iterator<Item = io::Result<String>>, prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let line = lines
        .next()
        .transpose()?
        .context("stdin closed")?;
    Ok(line.trim().to_lowercase())
}

fn parse_value(input: &str) -> Option<Value> {
    let normalized = input.trim().to_uppercase();
    ALL_VALUES.iter().copied().find(|v| {
        normalized == v.code().to_string() || normalized == v.display().to_uppercase()
    })
}
