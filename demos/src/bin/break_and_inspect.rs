//! Interrupts a running program from another thread and inspects it.
//!
//! A controller thread schedules a break through a [`BreakHandle`]. The
//! engine picks it up at its next safe point and hands the event to the
//! registered listener, which then:
//!
//! 1. asks for the innermost frame by calling a diagnostic function, and
//! 2. lists the internal slots of a promise the program created.
//!
//! Both run inside the debug context, so neither raises further events.

use std::{error::Error, sync::mpsc, thread};

use kestrel_debugger::{BreakHandle, DebuggerConfig, EventData, Registration};
use kestrel_harness::{Function, Op, ScriptEngine, Value};
use simple_logger::SimpleLogger;

const CONFIG: &str = r#"{ "exception_break": "all", "max_nested_calls": 4 }"#;

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;

    let mut engine = ScriptEngine::with_config(DebuggerConfig::from_json(CONFIG)?)?;
    let promise = Value::object(
        "Promise",
        [
            ("[[PromiseState]]", Value::string("pending")),
            ("[[PromiseResult]]", Value::Undefined),
        ],
    );

    let current_frame = Function::native(|state, _| {
        Ok(state
            .frames()
            .last()
            .map_or(Value::Undefined, |frame| Value::string(frame.as_str())))
    });
    let inspected = promise.clone();
    engine.set_listener(Some(Registration::<ScriptEngine>::new(
        move |details| {
            let reason = match details.event_data() {
                EventData::Break { reason } => *reason,
                EventData::Exception { exception, uncaught } => {
                    log::info!("[listener] exception {exception} (uncaught: {uncaught})");
                    return;
                }
                _ => {
                    log::info!(
                        "[listener] {} with data {}",
                        details.event(),
                        details.callback_data()
                    );
                    return;
                }
            };

            log::info!(
                "[listener] {reason:?} break at statement {}",
                details.execution_state().statement()
            );
            match details.call(&current_frame, Value::Undefined) {
                Ok(frame) => log::info!("[listener] paused in {frame}"),
                Err(err) => log::error!("[listener] frame lookup failed: {err}"),
            }
            for slot in &details.internal_properties(&inspected) {
                log::info!("[listener]   {} = {}", slot.name, slot.value);
            }
        },
        Value::string("demo"),
    )))?;

    let (scheduled_tx, scheduled_rx) = mpsc::channel();
    let handle: BreakHandle = engine.debugger().break_handle();
    let controller = thread::spawn(move || {
        log::info!("[controller] requesting a break");
        handle.schedule();
        scheduled_tx.send(()).ok();
    });

    engine
        .run(&[
            Op::compile("app.js"),
            Op::Enter("main".to_string()),
            Op::Statement,
        ])
        .map_err(|thrown| format!("uncaught {thrown}"))?;

    scheduled_rx.recv()?;
    controller
        .join()
        .map_err(|_| "controller thread panicked")?;

    engine
        .run(&[
            Op::Enter("fetchData".to_string()),
            Op::Statement,
            Op::Throw {
                value: Value::string("network down"),
                caught: true,
            },
            Op::Exit,
            Op::Exit,
        ])
        .map_err(|thrown| format!("uncaught {thrown}"))?;

    let seen = engine
        .outcomes()
        .iter()
        .filter(|outcome| outcome.is_delivered())
        .count();
    log::info!("{seen} events delivered");

    Ok(())
}
