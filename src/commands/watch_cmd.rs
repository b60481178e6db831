use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::commands::CommandError;
use crate::services::autosave::AutoSaveOutcome;
use crate::services::session::Session;

/// Takes an auto-save snapshot every `period` until `shutdown` resolves.
/// Returns how many snapshots were written.
pub async fn watch_until<F>(
    session: &mut Session,
    period: Duration,
    shutdown: F,
) -> Result<usize, CommandError>
where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(period);
    tokio::pin!(shutdown);
    let mut written = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                session.reload()?;
                if !session.auto_save_enabled()? {
                    debug!("auto-save disabled, skipping tick");
                    continue;
                }
                if session.auto_save(Utc::now())? == AutoSaveOutcome::Saved {
                    written += 1;
                    info!(written, "auto-save snapshot written");
                }
            }
        }
    }
    Ok(written)
}

pub async fn watch_command(
    session: &mut Session,
    interval: Option<u64>,
) -> Result<String, CommandError> {
    let seconds = interval.unwrap_or(session.config().auto_save.interval_secs).max(1);
    println!("Auto-saving every {seconds}s, press Ctrl-C to stop");
    let written = watch_until(session, Duration::from_secs(seconds), async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;
    Ok(format!("Watch stopped after {written} snapshots"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::CalculatorConfig;
    use crate::services::store::MemoryStore;
    use crate::test_support::populated_state;

    fn session() -> Session {
        let mut session =
            Session::open(CalculatorConfig::default(), Box::new(MemoryStore::new())).unwrap();
        session.state = populated_state();
        session.save().unwrap();
        session
    }

    #[tokio::test]
    async fn an_unchanged_project_is_snapshotted_once() {
        let mut session = session();
        let written = watch_until(
            &mut session,
            Duration::from_millis(5),
            tokio::time::sleep(Duration::from_millis(40)),
        )
        .await
        .unwrap();
        assert_eq!(written, 1);
    }

    #[tokio::test]
    async fn nothing_is_written_while_auto_save_is_disabled() {
        let mut session = session();
        session.set_auto_save(false).unwrap();
        let written = watch_until(
            &mut session,
            Duration::from_millis(5),
            tokio::time::sleep(Duration::from_millis(20)),
        )
        .await
        .unwrap();
        assert_eq!(written, 0);
    }
}
