use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::walker::Turn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInstruction {
    #[error("Empty instruction")]
    Empty,
    #[error("Invalid turn '{0}'")]
    Turn(char),
    #[error("Invalid distance in '{0}'")]
    Distance(String),
}

impl TryFrom<char> for Turn {
    type Error = InvalidInstruction;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            _ => Err(InvalidInstruction::Turn(c)),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Turn::Left => write!(f, "L"),
            Turn::Right => write!(f, "R"),
        }
    }
}

/// Turn, then take `distance` unit steps in the new direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub turn: Turn,
    pub distance: usize,
}

impl FromStr for Instruction {
    type Err = InvalidInstruction;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut chars = data.chars();
        let turn = chars
            .next()
            .ok_or(InvalidInstruction::Empty)
            .and_then(Turn::try_from)?;

        // Only bare digits, so no sign is accepted.
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidInstruction::Distance(data.to_string()));
        }
        let distance = digits
            .parse()
            .map_err(|_| InvalidInstruction::Distance(data.to_string()))?;

        Ok(Instruction { turn, distance })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.turn, self.distance)
    }
}

/// Parses a whole walk such as `R2, L3`. Any bad token fails the whole line.
pub fn parse_line(line: &str) -> Result<Vec<Instruction>, InvalidInstruction> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(Instruction::from_str)
        .collect()
}
