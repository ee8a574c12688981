//! Whole programs run through `Session` with in-memory I/O.

use shoal::{Codebox, Error, ErrorKind, Options, Session, Status};

struct Outcome {
    status: Status,
    stack: Vec<f64>,
    output: String,
    steps: u64,
}

fn run_with (src: &str, input: &str, options: Options) -> Outcome {
    let codebox = Codebox::parse(src);
    let mut session = Session::new(&codebox, input.as_bytes(), Vec::new(), options);
    let _ = session.run_for(100_000);
    let status = session.status();
    let stack = session.stack().values().to_vec();
    let steps = session.steps();
    let output = String::from_utf8(session.into_output()).expect("program wrote UTF-8");
    Outcome { status, stack, output, steps }
}

fn run (src: &str) -> Outcome {
    run_with(src, "", Options { seed: Some(0), ..Options::default() })
}

#[test]
fn hello_world () {
    let src = concat!(
        "\"dlrow ,olleh\"v\n",
        "         ;!?lo<\n",
    );
    let out = run(src);
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.output, "hello, world");
    assert!(out.stack.is_empty());
}

#[test]
fn countdown_with_jump () {
    let out = run("5:n1-:?!;10.");
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.output, "54321");
    assert_eq!(out.stack, vec![0.0]);
}

#[test]
fn mirrors_route_around_the_box () {
    let out = run("1\\\n;/");
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.stack, vec![1.0]);
}

#[test]
fn single_row_addition () {
    let out = run("21+;");
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.stack, vec![3.0]);
    assert_eq!(out.steps, 4);
}

#[test]
fn fault_keeps_earlier_output () {
    let out = run("1n10,n;");
    assert_eq!(out.status, Status::Faulted(ErrorKind::DivisionByZero));
    assert_eq!(out.output, "1");
}

#[test]
fn run_reports_typed_errors () {
    let codebox = Codebox::parse("$;");
    let mut session = Session::new(&codebox, "".as_bytes(), Vec::new(), Options::default());
    match session.run() {
        Err(Error::StackUnderflow { required, available }) => {
            assert_eq!((required, available), (2, 0));
        },
        other => panic!("expected underflow, got {other:?}"),
    }
    assert_eq!(session.status(), Status::Faulted(ErrorKind::StackUnderflow));
}

#[test]
fn random_mirror_eventually_escapes () {
    for seed in 0..20 {
        let out = run_with(">x1n;", "", Options { seed: Some(seed), ..Options::default() });
        assert_eq!(out.status, Status::Halted, "seed {seed}");
        assert_eq!(out.output, "1");
    }
}

#[test]
fn seeded_runs_are_reproducible () {
    let src = ">x1n;";
    let options = || Options { seed: Some(42), ..Options::default() };
    let a = run_with(src, "", options());
    let b = run_with(src, "", options());
    assert_eq!(a.steps, b.steps);
}

#[test]
fn squares_input () {
    let out = run_with("i:*n;", "7\n", Options::default());
    assert_eq!(out.output, "49");
}

#[test]
fn initial_stack_is_visible () {
    let options = Options { seed: None, initial_stack: vec![104.0, 105.0] };
    let out = run_with("ro o;", "", options);
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.output, "hi");
}

#[test]
fn sub_stack_reverse_only_touches_the_run () {
    // Moves the top two into a sub-stack, reverses them, merges back.
    let out = run("12342[r];");
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.stack, vec![1.0, 2.0, 4.0, 3.0]);
}

#[test]
fn empty_program_halts () {
    let out = run("");
    assert_eq!(out.status, Status::Halted);
    assert_eq!(out.steps, 0);
}

#[test]
fn grid_is_shared_between_sessions () {
    let codebox = Codebox::parse("ii+n;");
    let mut first = Session::new(&codebox, "1 2".as_bytes(), Vec::new(), Options::default());
    let mut second = Session::new(&codebox, "3 4".as_bytes(), Vec::new(), Options::default());
    first.run().expect("first run halts");
    second.run().expect("second run halts");
    assert_eq!(first.into_output(), b"3");
    assert_eq!(second.into_output(), b"7");
}
