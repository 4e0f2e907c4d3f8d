//! Break scheduling scenarios.

use std::{cell::RefCell, rc::Rc, thread};

use kestrel_debugger::{
    BreakReason, DebugEvent, DebuggerConfig, DispatchOutcome, DispatchState, EventData,
    ExceptionBreak, Registration,
};
use kestrel_harness::{ContextStats, Function, Op, ScriptEngine, Value};
use test_case::test_case;

type Breaks = Rc<RefCell<Vec<(DebugEvent, usize)>>>;

fn listen(engine: &mut ScriptEngine) -> Breaks {
    let breaks = Breaks::default();
    let sink = breaks.clone();
    engine
        .set_listener(Some(Registration::<ScriptEngine>::new(
            move |details| {
                sink.borrow_mut()
                    .push((details.event(), details.execution_state().statement()));
            },
            Value::Undefined,
        )))
        .unwrap();
    breaks
}

#[test]
fn scheduled_break_fires_once_at_the_next_safe_point() {
    let mut engine = ScriptEngine::new();
    let breaks = listen(&mut engine);
    let debugger = engine.debugger();

    debugger.schedule_break();
    assert_eq!(debugger.state(), DispatchState::BreakPending);
    engine.run(&[Op::Statement, Op::Statement]).unwrap();

    assert_eq!(*breaks.borrow(), vec![(DebugEvent::Break, 1)]);
    assert_eq!(debugger.state(), DispatchState::Idle);

    // Cancelling after the break fired changes nothing.
    debugger.cancel_break();
    engine.run(&[Op::Statement]).unwrap();
    assert_eq!(breaks.borrow().len(), 1);
}

#[test]
fn scheduling_twice_fires_once() {
    let mut engine = ScriptEngine::new();
    let breaks = listen(&mut engine);

    engine.debugger().schedule_break();
    engine.debugger().schedule_break();
    engine
        .run(&[Op::Statement, Op::Statement, Op::Statement])
        .unwrap();

    assert_eq!(*breaks.borrow(), vec![(DebugEvent::Break, 1)]);
}

#[test]
fn cancelled_break_never_fires() {
    let mut engine = ScriptEngine::new();
    let breaks = listen(&mut engine);

    engine.debugger().schedule_break();
    engine.debugger().cancel_break();
    engine.run(&[Op::Statement, Op::Statement]).unwrap();

    assert!(breaks.borrow().is_empty());
    assert_eq!(
        engine.outcomes(),
        [DispatchOutcome::NotPending, DispatchOutcome::NotPending]
    );
}

#[test]
fn break_scheduled_from_another_thread_fires() {
    let mut engine = ScriptEngine::new();
    let breaks = listen(&mut engine);

    let handle = engine.debugger().break_handle();
    thread::spawn(move || handle.schedule()).join().unwrap();
    engine.run(&[Op::Statement]).unwrap();

    assert_eq!(*breaks.borrow(), vec![(DebugEvent::Break, 1)]);
}

#[test]
fn break_without_listener_is_dropped() {
    let mut engine = ScriptEngine::new();

    engine.debugger().schedule_break();
    engine.run(&[Op::Statement, Op::Statement]).unwrap();

    assert_eq!(
        engine.outcomes(),
        [DispatchOutcome::NoListener, DispatchOutcome::NotPending]
    );
    assert_eq!(engine.debugger().state(), DispatchState::Idle);
}

#[test]
fn listener_can_schedule_the_next_break() {
    let mut engine = ScriptEngine::new();
    let breaks = Breaks::default();
    let sink = breaks.clone();
    engine
        .set_listener(Some(Registration::<ScriptEngine>::new(
            move |details| {
                let statement = details.execution_state().statement();
                sink.borrow_mut().push((details.event(), statement));
                if statement < 3 {
                    details.schedule_break();
                }
            },
            Value::Undefined,
        )))
        .unwrap();

    engine.debugger().schedule_break();
    engine
        .run(&[
            Op::Statement,
            Op::Statement,
            Op::Statement,
            Op::Statement,
            Op::Statement,
        ])
        .unwrap();

    assert_eq!(
        *breaks.borrow(),
        vec![
            (DebugEvent::Break, 1),
            (DebugEvent::Break, 2),
            (DebugEvent::Break, 3),
        ]
    );
}

#[test]
fn break_pending_during_a_diagnostic_call_waits_for_the_debuggee() {
    let mut engine = ScriptEngine::new();
    let breaks = listen(&mut engine);
    let debugger = engine.debugger();

    let scheduling = Function::script(
        vec![
            Op::host(|engine| engine.debugger().schedule_break()),
            Op::Statement,
            Op::Statement,
        ],
        Value::Undefined,
    );
    engine.call(&scheduling, Value::Undefined).unwrap();

    assert!(breaks.borrow().is_empty());
    assert_eq!(debugger.state(), DispatchState::BreakPending);

    engine.run(&[Op::Statement]).unwrap();
    assert_eq!(*breaks.borrow(), vec![(DebugEvent::Break, 3)]);
}

#[test]
fn debugger_statement_breaks() {
    let mut engine = ScriptEngine::new();
    let reasons = Rc::new(RefCell::new(Vec::new()));
    let sink = reasons.clone();
    engine
        .set_listener(Some(Registration::<ScriptEngine>::new(
            move |details| {
                if let EventData::Break { reason } = details.event_data() {
                    sink.borrow_mut().push(*reason);
                }
            },
            Value::Undefined,
        )))
        .unwrap();

    engine.debugger().schedule_break();
    engine
        .run(&[Op::Debugger, Op::Statement, Op::Debugger])
        .unwrap();

    assert_eq!(
        *reasons.borrow(),
        vec![BreakReason::DebuggerStatement, BreakReason::DebuggerStatement]
    );
}

#[test_case(ExceptionBreak::None, &[] ; "none")]
#[test_case(ExceptionBreak::Uncaught, &[false] ; "uncaught only")]
#[test_case(ExceptionBreak::All, &[true, false] ; "all")]
fn exception_events(policy: ExceptionBreak, expected: &[bool]) {
    let mut engine = ScriptEngine::with_config(DebuggerConfig {
        exception_break: policy,
        ..DebuggerConfig::default()
    })
    .unwrap();
    let caught = Rc::new(RefCell::new(Vec::new()));
    let sink = caught.clone();
    engine
        .set_listener(Some(Registration::<ScriptEngine>::new(
            move |details| {
                if let EventData::Exception { uncaught, .. } = details.event_data() {
                    sink.borrow_mut().push(!*uncaught);
                }
            },
            Value::Undefined,
        )))
        .unwrap();

    let result = engine.run(&[
        Op::Throw {
            value: Value::string("handled"),
            caught: true,
        },
        Op::Throw {
            value: Value::string("fatal"),
            caught: false,
        },
        Op::Statement,
    ]);

    assert_eq!(result, Err(Value::string("fatal")));
    assert_eq!(*caught.borrow(), expected);
}

#[test]
fn pending_break_keeps_the_debug_context_alive() {
    let mut engine = ScriptEngine::new();
    let _breaks = listen(&mut engine);

    engine.debugger().schedule_break();
    engine.set_listener(None).unwrap();
    assert_eq!(
        engine.context_stats(),
        ContextStats {
            created: 1,
            disposed: 0
        }
    );

    engine.run(&[Op::Statement]).unwrap();
    assert_eq!(
        engine.context_stats(),
        ContextStats {
            created: 1,
            disposed: 1
        }
    );
}

#[test]
fn cancelled_break_releases_the_debug_context_at_the_next_safe_point() {
    let mut engine = ScriptEngine::new();
    let breaks = listen(&mut engine);
    let debugger = engine.debugger();

    debugger.schedule_break();
    engine.set_listener(None).unwrap();
    debugger.cancel_break();
    engine
        .run(&[Op::Statement, Op::Statement, Op::Statement])
        .unwrap();

    assert!(breaks.borrow().is_empty());
    assert!(!debugger.is_debug_context_loaded());
    assert_eq!(
        engine.context_stats(),
        ContextStats {
            created: 1,
            disposed: 1
        }
    );
}
