use std::io::Write;

use isemail::{escape, parse};

fn check(line: &str) {
    let address = line.as_bytes();
    let diagnosis = parse(address);

    println!(
        "[!] \"{}\" -> {} (code {}, category {:?})",
        escape(address),
        diagnosis.message(),
        diagnosis.code(),
        diagnosis.category(),
    );

    if !diagnosis.is_valid() {
        println!("    {}", diagnosis.description());
    }
    for reference in diagnosis.references() {
        println!("    see {} ({})", reference.citation, reference.link);
    }
}

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();

    if let Some(path) = args.nth(1) {
        let data = std::fs::read_to_string(path)?;
        for line in data.lines() {
            check(line);
        }
        return Ok(());
    }

    loop {
        let line = {
            print!("Enter an address (or \"exit\"): ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        };

        if line == "exit" {
            break;
        }

        check(&line);
    }

    Ok(())
}
