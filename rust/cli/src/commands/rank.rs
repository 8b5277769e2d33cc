//! `rank`: the best five-card hand among 5 to 7 cards.

use crate::error::CliError;
use holdem_engine::cards::parse_cards;
use holdem_engine::hand::best_hand;
use std::io::Write;

pub fn handle_rank_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards)?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "rank needs 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let (strength, five) = best_hand(&cards);
    let five: String = five.iter().map(|c| c.to_string()).collect();
    let kickers: Vec<u8> = strength
        .kickers
        .iter()
        .copied()
        .take_while(|&k| k > 0)
        .collect();
    writeln!(out, "Category: {}", strength.category)?;
    writeln!(out, "Best five: {}", five)?;
    writeln!(out, "Kickers: {:?}", kickers)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(cards: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_rank_command(cards, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn ranks_seven_cards() {
        let text = rank("AhKhQhJhTh2c3d").unwrap();
        assert!(text.contains("Category: Straight Flush"));
        assert!(text.contains("Kickers: [14]"));
    }

    #[test]
    fn wheel_is_five_high() {
        let text = rank("Ah2d3c4s5h").unwrap();
        assert!(text.contains("Category: Straight"));
        assert!(text.contains("Kickers: [5]"));
    }

    #[test]
    fn rejects_wrong_card_counts() {
        assert!(matches!(rank("AhKh"), Err(CliError::InvalidInput(_))));
        assert!(matches!(rank("AhKhQhJhTh9h8h7h"), Err(CliError::InvalidInput(_))));
        assert!(matches!(rank("AhAhKcQd2s"), Err(CliError::InvalidInput(_))));
    }
}
