use pgql::context::Cancellation;

fn main() {
    let cancellation = Cancellation::default();
    let on_interrupt = cancellation.clone();
    if let Err(err) = ctrlc::set_handler(move || on_interrupt.cancel()) {
        eprintln!("warning: unable to install interrupt handler: {err}");
    }
    std::process::exit(pgql::run(std::env::args_os(), cancellation));
}
