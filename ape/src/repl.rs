use std::io::Write;

use ape_core::interpreter::prelude::Session;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	}).map_err(std::io::Error::other)?;

	let stdin = std::io::stdin();
	let mut session = Session::new();
	
	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			println!();
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
			".reset" => session.reset(),
			_ => {
				let response = session.run(&input);

				if response.kind == "PARSER_ERROR" {
					println!("Woops! Parser errors:\n\t{}", response.value.replace('\n', "\n\t"));
				} else {
					println!("{}", response.value);
				}
			}
		}
	}
}
