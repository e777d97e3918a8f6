use std::io::{self, Write};

fn read_answer(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ));
    }
    Ok(input.trim().to_lowercase())
}

pub fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let hint = match default {
        Some(true) => "(Y/n)",
        Some(false) | None => "(y/N)",
    };

    loop {
        match read_answer(&format!("{} {}: ", prompt, hint))?.as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}

/// Ask until the answer is a single letter from `choices`.
pub fn prompt_choice(prompt: &str, choices: &[char]) -> io::Result<char> {
    loop {
        let answer = read_answer(&format!("{}: ", prompt))?;
        match answer.chars().next() {
            Some(c) if answer.chars().count() == 1 && choices.contains(&c) => return Ok(c),
            _ => println!("Invalid input. Please try again."),
        }
    }
}
