use std::io::Write;

use ape_core::parser::prelude::parse_program;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();
	
	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let (program, errors) = parse_program(&input);

				if errors.is_empty() {
					println!("{}", program);
					continue;
				}

				for err in errors {
					let (message, messages) = err.details();

					println!("[at {}] Parse error: {}.\n\t{}", err.span.start, message, messages.join(";\n\t"))
				}
			}
		}
	}
}
