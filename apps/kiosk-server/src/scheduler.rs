//! # Daily Statistics Report Scheduler
//!
//! Mails yesterday's sales total once a day.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Report Scheduler Loop                                │
//! │                                                                         │
//! │   start() ──► sleep until next run_at ──► report(run date - 1 day)     │
//! │                    ▲                              │                     │
//! │                    └──────────────────────────────┘                     │
//! │                                                                         │
//! │   ReportSchedulerHandle                                                 │
//! │     • run_now(date)  report immediately, get the result back            │
//! │     • shutdown()     stop after the current report                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed report is logged and the loop keeps going; the next attempt is
//! the next day's. A date is reported at most once per scheduler run, even
//! if the timer wakes early and fires twice for the same `run_at`.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::services::OrderStatisticsService;

/// What the scheduler needs to know.
#[derive(Debug, Clone)]
pub struct ReportSchedule {
    /// Local time of day to fire.
    pub run_at: NaiveTime,

    /// Recipient of every scheduled report.
    pub recipient: String,
}

/// Commands for the scheduler.
#[derive(Debug)]
enum SchedulerCommand {
    /// Report on `date` now.
    RunNow {
        date: NaiveDate,
        reply: oneshot::Sender<ApiResult<bool>>,
    },
    /// Stop the scheduler.
    Shutdown,
}

/// Handle for controlling the scheduler.
#[derive(Clone)]
pub struct ReportSchedulerHandle {
    cmd_tx: mpsc::Sender<SchedulerCommand>,
}

impl ReportSchedulerHandle {
    /// Sends the report for `date` immediately and returns its result.
    pub async fn run_now(&self, date: NaiveDate) -> ApiResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(SchedulerCommand::RunNow { date, reply })
            .await
            .map_err(|_| ApiError::internal("Report scheduler stopped"))?;

        rx.await
            .map_err(|_| ApiError::internal("Report scheduler dropped the request"))?
    }

    /// Stops the scheduler.
    pub async fn shutdown(&self) {
        if self.cmd_tx.send(SchedulerCommand::Shutdown).await.is_err() {
            warn!("Report scheduler already stopped");
        }
    }
}

/// Background job around [`OrderStatisticsService`].
pub struct ReportScheduler {
    schedule: ReportSchedule,
    statistics: OrderStatisticsService,
}

impl ReportScheduler {
    pub fn new(schedule: ReportSchedule, statistics: OrderStatisticsService) -> Self {
        ReportScheduler {
            schedule,
            statistics,
        }
    }

    /// Starts the scheduler and returns a handle.
    pub fn start(self) -> ReportSchedulerHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        ReportSchedulerHandle { cmd_tx }
    }

    /// Main scheduler loop.
    async fn run(self, mut cmd_rx: mpsc::Receiver<SchedulerCommand>) {
        info!(
            run_at = %self.schedule.run_at,
            recipient = %self.schedule.recipient,
            "Report scheduler started"
        );

        let mut last_reported: Option<NaiveDate> = None;

        loop {
            let now = Local::now().naive_local();
            let next_run = next_run_after(now, self.schedule.run_at);
            let wait = (next_run - now).to_std().unwrap_or_default();

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    match report_date_for(next_run) {
                        Some(date) if mark_reported(&mut last_reported, date) => {
                            self.report(date).await;
                        }
                        Some(date) => debug!(%date, "Report already sent, skipping"),
                        None => error!(%next_run, "No previous day to report on"),
                    }
                }
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(SchedulerCommand::RunNow { date, reply }) => {
                            let result = self.report(date).await;
                            let _ = reply.send(result);
                        }
                        Some(SchedulerCommand::Shutdown) | None => {
                            info!("Report scheduler shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn report(&self, date: NaiveDate) -> ApiResult<bool> {
        let result = self
            .statistics
            .send_order_statistics_mail(date, &self.schedule.recipient)
            .await;

        match &result {
            Ok(true) => info!(%date, "Scheduled report sent"),
            Ok(false) => warn!(%date, "Scheduled report was not accepted by the mail client"),
            Err(e) => error!(%date, error = %e, "Scheduled report failed"),
        }
        result
    }
}

/// First `run_at` strictly after `now`.
pub fn next_run_after(now: NaiveDateTime, run_at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(run_at);
    if today > now {
        return today;
    }

    now.date()
        .checked_add_days(Days::new(1))
        .map(|tomorrow| tomorrow.and_time(run_at))
        .unwrap_or(today)
}

/// The day a run at `run` reports on: the day before.
pub fn report_date_for(run: NaiveDateTime) -> Option<NaiveDate> {
    run.date().checked_sub_days(Days::new(1))
}

/// Records `date` as reported. False if it was the last date reported.
fn mark_reported(last_reported: &mut Option<NaiveDate>, date: NaiveDate) -> bool {
    if *last_reported == Some(date) {
        return false;
    }
    *last_reported = Some(date);
    true
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_next_run_later_today() {
        assert_eq!(next_run_after(at(1, 0, 5), time(0, 10)), at(1, 0, 10));
    }

    #[test]
    fn test_next_run_tomorrow_once_passed() {
        assert_eq!(next_run_after(at(1, 0, 10), time(0, 10)), at(2, 0, 10));
        assert_eq!(next_run_after(at(1, 23, 0), time(0, 10)), at(2, 0, 10));
    }

    #[test]
    fn test_next_run_crosses_month() {
        assert_eq!(
            next_run_after(at(30, 12, 0), time(6, 0)),
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_reports_previous_day() {
        assert_eq!(
            report_date_for(at(2, 0, 10)),
            NaiveDate::from_ymd_opt(2024, 4, 1)
        );
    }

    #[test]
    fn test_same_date_is_reported_once() {
        let mut last_reported = None;
        let run = at(2, 0, 10);
        let date = report_date_for(run).unwrap();

        assert!(mark_reported(&mut last_reported, date));
        // the timer woke early and fired again for the same run_at
        assert!(!mark_reported(&mut last_reported, report_date_for(run).unwrap()));
        assert_eq!(last_reported, Some(date));
    }

    #[test]
    fn test_next_day_is_reported_again() {
        let mut last_reported = None;

        assert!(mark_reported(&mut last_reported, report_date_for(at(2, 0, 10)).unwrap()));
        assert!(mark_reported(&mut last_reported, report_date_for(at(3, 0, 10)).unwrap()));
        assert_eq!(last_reported, NaiveDate::from_ymd_opt(2024, 4, 2));
    }
}
