use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::{log, UserIdentity};
use crate::games::GameBroadcaster;
use crate::scores::{LeaderboardQuery, ScoreMetadata, ScoreService, ScoreServiceEvent};
use super::constants::GAME_MODE;
use super::controller::{GameController, GameOverSummary};
use super::types::{Direction, GameStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Turn(Direction),
    TogglePause,
    Pause,
    Resume,
    Stop,
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub leaderboard: LeaderboardQuery,
    pub mode: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            leaderboard: LeaderboardQuery::default(),
            mode: GAME_MODE.to_string(),
        }
    }
}

/// Drives a [`GameController`] from a timer and a command channel until the
/// channel closes or `Stop` arrives.
pub struct SnakeSession;

impl SnakeSession {
    pub async fn run<S, B>(
        mut controller: GameController,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        score_service: S,
        broadcaster: B,
        options: SessionOptions,
    ) -> GameController
    where
        S: ScoreService,
        B: GameBroadcaster,
    {
        let mut events = score_service.subscribe();
        let mut events_open = true;
        let mut timer: Option<Interval> = None;

        let mut user = match score_service.get_current_user().await {
            Ok(user) => user,
            Err(e) => {
                log!("Failed to resolve current user: {}", e);
                None
            }
        };
        broadcaster.broadcast_user(user.clone()).await;
        spawn_leaderboard_refresh(&score_service, &broadcaster, options.leaderboard);
        broadcaster.broadcast_state(controller.snapshot()).await;
        sync_timer(&mut timer, &controller);

        log!("Session started");

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    if command == SessionCommand::Stop {
                        break;
                    }
                    if handle_command(&mut controller, command) {
                        sync_timer(&mut timer, &controller);
                        broadcaster.broadcast_state(controller.snapshot()).await;
                    }
                }
                _ = next_tick(&mut timer) => {
                    let Some(report) = controller.tick() else {
                        timer = None;
                        continue;
                    };

                    if report.speed_changed {
                        timer = Some(schedule(controller.speed()));
                    }

                    broadcaster.broadcast_state(controller.snapshot()).await;

                    if let Some(summary) = report.game_over {
                        timer = None;
                        broadcaster.broadcast_game_over(summary.clone()).await;
                        let grid_size = controller.settings().board_size as u32;
                        finish_game(&score_service, &broadcaster, &options, user.as_ref(), grid_size, summary);
                    }
                }
                event = events.recv(), if events_open => {
                    match event {
                        Ok(ScoreServiceEvent::AuthStateChanged(new_user)) => {
                            user = new_user;
                            broadcaster.broadcast_user(user.clone()).await;
                        }
                        Ok(ScoreServiceEvent::ScoreInserted) => {
                            spawn_leaderboard_refresh(&score_service, &broadcaster, options.leaderboard);
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            log!("Missed {} score service events, refreshing", skipped);
                            if let Ok(current) = score_service.get_current_user().await {
                                user = current;
                                broadcaster.broadcast_user(user.clone()).await;
                            }
                            spawn_leaderboard_refresh(&score_service, &broadcaster, options.leaderboard);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            events_open = false;
                        }
                    }
                }
            }
        }

        log!("Session stopped with status {:?}", controller.status());
        controller
    }
}

/// Returns whether anything visible changed.
fn handle_command(controller: &mut GameController, command: SessionCommand) -> bool {
    match command {
        SessionCommand::Start => {
            controller.start();
            true
        }
        SessionCommand::Turn(direction) => {
            controller.request_direction(direction);
            false
        }
        SessionCommand::TogglePause => controller.toggle_pause(),
        SessionCommand::Pause => controller.pause(),
        SessionCommand::Resume => controller.resume(),
        SessionCommand::Stop => false,
    }
}

/// Timer exists only while playing. Restarting always schedules the first
/// tick one full period out.
fn sync_timer(timer: &mut Option<Interval>, controller: &GameController) {
    match controller.status() {
        GameStatus::Playing => *timer = Some(schedule(controller.speed())),
        GameStatus::Idle | GameStatus::Paused | GameStatus::GameOver => *timer = None,
    }
}

fn schedule(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn finish_game<S, B>(
    score_service: &S,
    broadcaster: &B,
    options: &SessionOptions,
    user: Option<&UserIdentity>,
    grid_size: u32,
    summary: GameOverSummary,
) where
    S: ScoreService,
    B: GameBroadcaster,
{
    let Some(user) = user else {
        spawn_leaderboard_refresh(score_service, broadcaster, options.leaderboard);
        return;
    };

    let score_service = score_service.clone();
    let broadcaster = broadcaster.clone();
    let query = options.leaderboard;
    let metadata = ScoreMetadata {
        mode: options.mode.clone(),
        duration_seconds: summary.duration_seconds,
        grid_size,
    };
    let username = user.display_name().to_string();

    tokio::spawn(async move {
        match score_service.submit_score(summary.score, metadata).await {
            Ok(()) => log!("Submitted score {} for {}", summary.score, username),
            Err(e) => log!("Score submission failed: {}", e),
        }
        refresh_leaderboard(&score_service, &broadcaster, query).await;
    });
}

fn spawn_leaderboard_refresh<S, B>(score_service: &S, broadcaster: &B, query: LeaderboardQuery)
where
    S: ScoreService,
    B: GameBroadcaster,
{
    let score_service = score_service.clone();
    let broadcaster = broadcaster.clone();
    tokio::spawn(async move {
        refresh_leaderboard(&score_service, &broadcaster, query).await;
    });
}

async fn refresh_leaderboard<S, B>(score_service: &S, broadcaster: &B, query: LeaderboardQuery)
where
    S: ScoreService,
    B: GameBroadcaster,
{
    match score_service.get_global_leaderboard(query).await {
        Ok(entries) => broadcaster.broadcast_leaderboard(entries).await,
        Err(e) => log!("Failed to fetch leaderboard: {}", e),
    }
}
