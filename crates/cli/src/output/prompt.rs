//! Interactive line prompts on the terminal

use std::io::{self, BufRead};

use console::Term;

/// Ask a question on stderr and read one line of input
///
/// Answers may also be piped in on stdin; running out of input is an error.
pub fn ask(question: &str) -> io::Result<String> {
    let term = Term::stderr();
    term.write_str(question)?;
    let answer = if term.is_term() {
        term.read_line()?
    } else {
        read_piped_line(&mut io::stdin().lock())?
    };
    Ok(answer.trim().to_string())
}

/// Ask a yes/no question, repeating until the answer is recognised
pub fn confirm(question: &str) -> io::Result<bool> {
    loop {
        let answer = ask(&format!("{question} [y/n] "))?;
        if let Some(choice) = parse_yes_no(&answer) {
            return Ok(choice);
        }
    }
}

fn read_piped_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before all questions were answered",
        ));
    }
    Ok(line)
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("y"), Some(true));
        assert_eq!(parse_yes_no(" YES "), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("No"), Some(false));
        assert_eq!(parse_yes_no(""), None);
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_read_piped_line() {
        let mut input = io::Cursor::new("ds1\nredfox\n");
        assert_eq!(read_piped_line(&mut input).unwrap(), "ds1\n");
        assert_eq!(read_piped_line(&mut input).unwrap(), "redfox\n");

        let err = read_piped_line(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
