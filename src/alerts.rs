// src/alerts.rs
//
// Service-due notification pipeline. The pure threshold evaluation lives in
// domain::monitor; this module wires it to the store: the unread-duplicate
// guard, the notification insert, and the machine checkpoint advance.

use log::{error, info};
use rusqlite::Connection;

use crate::db::{machines, notifications};
use crate::domain::machine::{Machine, ServiceCheckpoint};
use crate::domain::monitor::{evaluate, ThresholdPolicy};
use crate::errors::ServerError;

/// Evaluate one machine and emit a notification to `user_id` if a threshold
/// crossing is due. Returns whether a notification was created.
pub fn check_machine(
    conn: &Connection,
    machine: &Machine,
    user_id: i64,
    policy: &ThresholdPolicy,
    now: i64,
) -> Result<bool, ServerError> {
    let Some(alert) = evaluate(machine, policy) else {
        return Ok(false);
    };

    // An identical-level unread alert already waiting for this user means a
    // new one would just pile up; skip without advancing the checkpoint so
    // the next evaluation sees the same state.
    if notifications::has_unread(conn, &machine.machine_id, alert.level, user_id)? {
        return Ok(false);
    }

    let label = format!("{} ({})", machine.name, machine.machine_id);
    notifications::insert_notification(
        conn,
        user_id,
        &machine.machine_id,
        &label,
        &alert.message,
        alert.level,
        alert.triggered_threshold,
        alert.current_value,
        alert.interval_value,
        now,
    )?;

    machines::set_checkpoint(
        conn,
        &machine.machine_id,
        alert.gauge,
        ServiceCheckpoint {
            threshold: alert.triggered_threshold,
            value: alert.current_value,
            at: now,
        },
    )?;

    info!(
        "service notification ({}) emitted for machine {}",
        alert.level.as_str(),
        machine.machine_id
    );
    Ok(true)
}

/// Run the monitor over every machine. Invoked after machine writes and on
/// machine-list renders; the whole pass is idempotent, so re-running on
/// every observed change is safe. A failing machine is logged and skipped;
/// the next evaluation will attempt again naturally.
pub fn check_all_machines(
    conn: &Connection,
    user_id: i64,
    policy: &ThresholdPolicy,
    now: i64,
) -> Result<usize, ServerError> {
    let mut emitted = 0;
    for machine in machines::list_all(conn)? {
        match check_machine(conn, &machine, user_id, policy, now) {
            Ok(true) => emitted += 1,
            Ok(false) => {}
            Err(e) => error!(
                "service check failed for machine {}: {e}",
                machine.machine_id
            ),
        }
    }
    Ok(emitted)
}
