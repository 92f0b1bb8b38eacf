//! Terminal output for query results

use owo_colors::OwoColorize;

/// Print one query/answer exchange
pub fn display_exchange(query: &str, agent: &str, response: &str) {
    println!("{} {}", "Query:".bold(), query);
    println!("{} {}", "Routed to:".bold(), colored_agent(agent));
    println!("{} {}", "Response:".bold(), response);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".bright_red(), message);
}

pub fn separator() -> String {
    "-".repeat(50)
}

fn colored_agent(agent: &str) -> String {
    match agent {
        "Weather Agent" => agent.bright_cyan().to_string(),
        "API Agent" => agent.bright_magenta().to_string(),
        _ => agent.bright_green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_agent_keeps_label() {
        for agent in ["Weather Agent", "API Agent", "Math Agent"] {
            assert!(colored_agent(agent).contains(agent));
        }
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(separator().len(), 50);
    }
}
