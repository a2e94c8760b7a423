use crate::cli::events::{load_events, AnswerEvent};
use crate::cli::opts::*;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use vocabrep_core::{
    calculate_next_review, memory::MemoryStore, Clock, EngineConfig, FixedClock, ReviewService,
    ScheduleState,
};

pub async fn run_cli(args: Cli) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    match args.cmd {
        Command::Schedule(cmd) => schedule_cmd(&config, cmd),
        Command::Replay(cmd) => {
            let svc = replay(&config, &cmd).await?;
            print_json(&svc.dashboard(&cmd.user).await?)
        }
        Command::Queue(cmd) => {
            let svc = replay(&config, &cmd.replay).await?;
            let cards = svc
                .review_queue(&cmd.replay.user, &cmd.scope_filter(), cmd.limit)
                .await?;
            print_json(&cards)
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(EngineConfig::from_json_str(&data)?)
}

fn schedule_cmd(config: &EngineConfig, cmd: ScheduleCmd) -> Result<()> {
    let today = match cmd.today {
        Some(d) => d,
        None => config.system_clock()?.today(),
    };
    let state = ScheduleState {
        ease_factor: cmd.ease_factor,
        interval: cmd.interval,
        repetitions: cmd.repetitions,
    };
    let outcome = calculate_next_review(cmd.quality, &state, today)?;
    print_json(&outcome)
}

/// Runs `cmd.user`'s events through a fresh in-memory store on a virtual
/// clock, leaving the clock on the report day.
async fn replay(config: &EngineConfig, cmd: &ReplayCmd) -> Result<ReviewService> {
    let events: Vec<AnswerEvent> = load_events(&cmd.events)?
        .into_iter()
        .filter(|e| e.user == cmd.user)
        .collect();
    let report_day = cmd
        .today
        .or_else(|| events.last().map(|e| e.date))
        .ok_or_else(|| anyhow!("no events for user {:?}; pass --today", cmd.user))?;

    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::at_date(report_day));
    let svc = ReviewService::new(store.clone(), store, clock.clone(), config.clone());

    for e in &events {
        clock.set_date(e.date);
        svc.record_answer(&e.user, &e.answer)
            .await
            .with_context(|| format!("replaying {:?} on {}", e.answer.word, e.date))?;
    }
    clock.set_date(report_day);
    log::info!("replayed {} events, reporting on {report_day}", events.len());
    Ok(svc)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
