//! CLI command implementations.

use std::io::{self, BufWriter, Write};

use ls8_vm::Machine;

/// Load and execute a program file, writing PRN output to stdout.
pub fn run(path: &str) -> Result<(), i32> {
    let program = ls8_loader::load_file(path).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    log::debug!(
        "{path}: {} words\n{}",
        program.len(),
        ls8_loader::disassemble(&program)
    );

    let mut machine = Machine::new();
    machine.load(&program).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = machine.run(&mut out);
    // Output produced before a failure still belongs on stdout.
    let flushed = out.flush();

    if let Err(e) = result {
        eprintln!("runtime error: {e}");
        log::debug!("{}", machine.trace_line());
        return Err(2);
    }
    flushed.map_err(|e| {
        eprintln!("error: cannot write output: {e}");
        1
    })?;

    log::info!("halted after {} cycles", machine.cycles());
    Ok(())
}
