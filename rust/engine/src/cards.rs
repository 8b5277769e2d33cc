use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{DealError, ParseError};
use crate::game::Street;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> Result<Suit, ParseError> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(ParseError::UnknownSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    /// Converts a numeric value in `2..=14` to a rank.
    pub fn from_u8(v: u8) -> Option<Rank> {
        let r = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(r)
    }

    pub fn from_char(c: char) -> Result<Rank, ParseError> {
        match c.to_ascii_uppercase() {
            '2'..='9' => Ok(Rank::from_u8(c as u8 - b'0').ok_or(ParseError::UnknownRank(c))?),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(ParseError::UnknownRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            low => (b'0' + low as u8) as char,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Represents a single playing card with a rank and suit.
/// Cards order by rank first, then by suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parses compact notation: `"Ac"`, `"td"`, and `"10h"` for ten.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [r, su] => Ok(Card::new(Rank::from_char(*r)?, Suit::from_char(*su)?)),
            ['1', '0', su] => Ok(Card::new(Rank::Ten, Suit::from_char(*su)?)),
            _ => Err(ParseError::InvalidLength(s.to_string())),
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a run of cards such as `"KsJs3d"`, `"Kc 10d"` or `"Ah,Kh"`.
///
/// Duplicates are rejected.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseError> {
    let chars: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let mut cards = Vec::with_capacity(chars.len() / 2);
    let mut i = 0;
    while i < chars.len() {
        let width = if chars[i] == '1' && chars.get(i + 1) == Some(&'0') {
            3
        } else {
            2
        };
        let Some(token) = chars.get(i..i + width) else {
            return Err(ParseError::InvalidLength(chars[i..].iter().collect()));
        };
        let card: Card = token.iter().collect::<String>().parse()?;
        if cards.contains(&card) {
            return Err(ParseError::DuplicateCard(card));
        }
        cards.push(card);
        i += width;
    }
    Ok(cards)
}

/// A player's two private cards, stored high card first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Card; 2]", into = "[Card; 2]")]
pub struct HoleCards {
    high: Card,
    low: Card,
}

impl HoleCards {
    pub fn new(a: Card, b: Card) -> Result<Self, ParseError> {
        if a == b {
            return Err(ParseError::DuplicateCard(a));
        }
        let (high, low) = if a > b { (a, b) } else { (b, a) };
        Ok(Self { high, low })
    }

    pub fn high(&self) -> Card {
        self.high
    }

    pub fn low(&self) -> Card {
        self.low
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.high == card || self.low == card
    }

    pub fn is_suited(&self) -> bool {
        self.high.suit == self.low.suit
    }

    pub fn is_pair(&self) -> bool {
        self.high.rank == self.low.rank
    }
}

impl TryFrom<[Card; 2]> for HoleCards {
    type Error = ParseError;

    fn try_from(cards: [Card; 2]) -> Result<Self, Self::Error> {
        HoleCards::new(cards[0], cards[1])
    }
}

impl From<HoleCards> for [Card; 2] {
    fn from(h: HoleCards) -> Self {
        h.cards()
    }
}

impl FromStr for HoleCards {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)?.as_slice() {
            [a, b] => HoleCards::new(*a, *b),
            other => Err(ParseError::WrongCardCount {
                expected: "2",
                actual: other.len(),
            }),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

/// Community cards grouped by street. A board may be partially dealt, but a
/// later street is never present without the earlier ones and no card repeats.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Board {
    flop: Option<[Card; 3]>,
    turn: Option<Card>,
    river: Option<Card>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fully dealt board straight from the deck, whose cards are distinct.
    pub(crate) fn complete(flop: [Card; 3], turn: Card, river: Card) -> Self {
        Self {
            flop: Some(flop),
            turn: Some(turn),
            river: Some(river),
        }
    }

    /// The first three community cards
    pub fn flop(&self) -> Option<[Card; 3]> {
        self.flop
    }

    /// The fourth community card
    pub fn turn(&self) -> Option<Card> {
        self.turn
    }

    /// The fifth community card
    pub fn river(&self) -> Option<Card> {
        self.river
    }

    /// Builds a board from 0, 3, 4 or 5 distinct cards in dealing order.
    pub fn from_cards(cards: &[Card]) -> Result<Self, ParseError> {
        for (i, c) in cards.iter().enumerate() {
            if cards[..i].contains(c) {
                return Err(ParseError::DuplicateCard(*c));
            }
        }
        match *cards {
            [] => Ok(Self::empty()),
            [a, b, c] => Ok(Self {
                flop: Some([a, b, c]),
                ..Self::default()
            }),
            [a, b, c, t] => Ok(Self {
                flop: Some([a, b, c]),
                turn: Some(t),
                river: None,
            }),
            [a, b, c, t, r] => Ok(Self {
                flop: Some([a, b, c]),
                turn: Some(t),
                river: Some(r),
            }),
            _ => Err(ParseError::WrongCardCount {
                expected: "0, 3, 4 or 5",
                actual: cards.len(),
            }),
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        let mut v = Vec::with_capacity(5);
        if let Some(flop) = self.flop {
            v.extend_from_slice(&flop);
        }
        v.extend(self.turn);
        v.extend(self.river);
        v
    }

    pub fn len(&self) -> usize {
        self.flop.map_or(0, |_| 3)
            + usize::from(self.turn.is_some())
            + usize::from(self.river.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.flop.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.river.is_some()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards().contains(&card)
    }

    /// The street whose betting this board corresponds to.
    pub fn street(&self) -> Street {
        match self.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// The cards visible to players on `street`.
    pub fn visible_at(&self, street: Street) -> Board {
        match street {
            Street::Preflop => Board::empty(),
            Street::Flop => Board {
                flop: self.flop,
                ..Board::default()
            },
            Street::Turn => Board {
                flop: self.flop,
                turn: self.turn,
                river: None,
            },
            Street::River | Street::Over => *self,
        }
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = ParseError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Board::from_cards(&cards)
    }
}

impl From<Board> for Vec<Card> {
    fn from(b: Board) -> Self {
        b.cards()
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_cards(&parse_cards(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.cards() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Smallest and largest table sizes a deal supports.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// One pair of hole cards per seat plus a complete board, all cards distinct.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FullDeal {
    hole_cards: Vec<HoleCards>,
    board: Board,
}

impl FullDeal {
    pub fn new(hole_cards: Vec<HoleCards>, board: Board) -> Result<Self, DealError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&hole_cards.len()) {
            return Err(DealError::PlayerCount(hole_cards.len()));
        }
        if !board.is_complete() {
            return Err(DealError::IncompleteBoard(board.len()));
        }
        let mut seen: Vec<Card> = Vec::with_capacity(hole_cards.len() * 2 + 5);
        let all = hole_cards
            .iter()
            .flat_map(|h| h.cards())
            .chain(board.cards());
        for c in all {
            if seen.contains(&c) {
                return Err(DealError::DuplicateCard(c));
            }
            seen.push(c);
        }
        Ok(Self { hole_cards, board })
    }

    pub fn hole_cards(&self) -> &[HoleCards] {
        &self.hole_cards
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn num_players(&self) -> usize {
        self.hole_cards.len()
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_notation() {
        let c: Card = "Ac".parse().unwrap();
        assert_eq!(c, Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!("td".parse::<Card>().unwrap().rank, Rank::Ten);
        assert_eq!("10h".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(c.to_string(), "Ac");
    }

    #[test]
    fn rejects_malformed_cards() {
        assert_eq!("A".parse::<Card>(), Err(ParseError::InvalidLength("A".into())));
        assert_eq!("Acd".parse::<Card>(), Err(ParseError::InvalidLength("Acd".into())));
        assert_eq!("1c".parse::<Card>(), Err(ParseError::UnknownRank('1')));
        assert_eq!("Ax".parse::<Card>(), Err(ParseError::UnknownSuit('x')));
    }

    #[test]
    fn ordering_is_rank_then_suit() {
        let two_spades: Card = "2s".parse().unwrap();
        let three_clubs: Card = "3c".parse().unwrap();
        let three_hearts: Card = "3h".parse().unwrap();
        assert!(two_spades < three_clubs);
        assert!(three_clubs < three_hearts);
    }

    #[test]
    fn hole_cards_are_unordered() {
        let a: HoleCards = "AcKd".parse().unwrap();
        let b: HoleCards = "KdAc".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.high().rank, Rank::Ace);
        assert!(matches!(
            "AcAc".parse::<HoleCards>(),
            Err(ParseError::DuplicateCard(_))
        ));
        assert!(matches!(
            "AcKdQh".parse::<HoleCards>(),
            Err(ParseError::WrongCardCount { actual: 3, .. })
        ));
    }

    #[test]
    fn board_sizes_follow_streets() {
        let flop: Board = "KsJs3d".parse().unwrap();
        assert_eq!(flop.len(), 3);
        assert_eq!(flop.street(), Street::Flop);
        let full: Board = "Kd Js 3d 7s 6s".parse().unwrap();
        assert!(full.is_complete());
        assert_eq!(full.visible_at(Street::Turn).len(), 4);
        assert!("KsJs".parse::<Board>().is_err());
    }

    #[test]
    fn board_is_only_built_through_validation() {
        let turn: Board = "KsJs3d7h".parse().unwrap();
        let flop: Vec<Card> = turn.flop().unwrap().to_vec();
        assert_eq!(flop, parse_cards("KsJs3d").unwrap());
        assert_eq!(turn.turn(), Some("7h".parse().unwrap()));
        assert_eq!(turn.river(), None);

        // a lone turn card or a repeated card never becomes a Board
        assert!(serde_json::from_str::<Board>("[\"7h\"]").is_err());
        assert!(serde_json::from_str::<Board>("[\"Ks\",\"Js\",\"Ks\"]").is_err());
        assert!(matches!(
            "KsJs3dKs".parse::<Board>(),
            Err(ParseError::DuplicateCard(_))
        ));
    }

    #[test]
    fn full_deal_rejects_shared_cards() {
        let board: Board = "KdJs3d7s6s".parse().unwrap();
        let holes = vec!["AhKs".parse().unwrap(), "Kd10c".parse().unwrap()];
        assert_eq!(
            FullDeal::new(holes, board),
            Err(DealError::DuplicateCard("Kd".parse().unwrap()))
        );
    }

    #[test]
    fn full_deal_requires_complete_board() {
        let board: Board = "KdJs3d".parse().unwrap();
        let holes = vec!["AhKs".parse().unwrap(), "Qc10c".parse().unwrap()];
        assert_eq!(FullDeal::new(holes, board), Err(DealError::IncompleteBoard(3)));
    }

    #[test]
    fn card_serializes_as_notation() {
        let c: Card = "Qh".parse().unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"Qh\"");
        let back: Card = serde_json::from_str("\"Qh\"").unwrap();
        assert_eq!(back, c);
    }
}
