use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};

use crate::instruction::Instruction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    fn turned(self, turn: Turn) -> Self {
        use Turn::*;
        let increment = match turn {
            Left => 3,
            Right => 1,
        };
        Self::ALL[(self as usize + increment) % 4]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Position {
    pub fn origin() -> Self {
        Position { x: 0, y: 0 }
    }

    fn shift(&mut self, direction: Direction) {
        use Direction::*;
        match direction {
            North => self.y += 1,
            East => self.x += 1,
            South => self.y -= 1,
            West => self.x -= 1,
        }
    }

    /// Manhattan distance from the origin.
    pub fn distance(self) -> u64 {
        self.x.unsigned_abs() + self.y.unsigned_abs()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkResult {
    pub final_position: Position,
    pub first_revisit: Option<Position>,
    pub steps: usize,
}

/// Follows instructions one unit step at a time, remembering every cell it has
/// stood on so that the first cell reached twice can be reported.
pub struct GridWalker {
    position: Position,
    direction: Direction,
    visited: HashSet<Position>,
    first_revisit: Option<Position>,
    steps: usize,
}

impl GridWalker {
    fn new() -> Self {
        let mut visited = HashSet::new();
        visited.insert(Position::origin());

        GridWalker {
            position: Position::origin(),
            direction: Direction::North,
            visited,
            first_revisit: None,
            steps: 0,
        }
    }

    pub fn run(instructions: impl IntoIterator<Item = Instruction>) -> WalkResult {
        let mut walker = GridWalker::new();
        for instruction in instructions {
            walker.follow(instruction);
        }
        walker.finish()
    }

    pub fn follow(&mut self, instruction: Instruction) {
        self.direction = self.direction.turned(instruction.turn);
        trace!(
            "{} from {}, now facing {:?}",
            instruction,
            self.position,
            self.direction
        );

        for _ in 0..instruction.distance {
            self.step();
        }
    }

    fn step(&mut self) {
        self.position.shift(self.direction);
        self.steps += 1;

        // insert() returns false when the cell was already there.
        if !self.visited.insert(self.position) && self.first_revisit.is_none() {
            debug!(
                "First revisit at {} after {} steps",
                self.position, self.steps
            );
            self.first_revisit = Some(self.position);
        }
    }

    pub fn finish(self) -> WalkResult {
        WalkResult {
            final_position: self.position,
            first_revisit: self.first_revisit,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn walk(line: &str) -> WalkResult {
        GridWalker::run(crate::instruction::parse_line(line).unwrap())
    }

    fn at(x: i64, y: i64) -> Position {
        Position { x, y }
    }

    #[test_case(Direction::North, Turn::Right => Direction::East)]
    #[test_case(Direction::West, Turn::Right => Direction::North)]
    #[test_case(Direction::North, Turn::Left => Direction::West)]
    #[test_case(Direction::East, Turn::Left => Direction::North)]
    fn turning(direction: Direction, turn: Turn) -> Direction {
        direction.turned(turn)
    }

    #[test]
    fn four_turns_come_back_round() {
        for &turn in &[Turn::Left, Turn::Right] {
            let mut direction = Direction::North;
            for _ in 0..4 {
                direction = direction.turned(turn);
            }
            assert_eq!(direction, Direction::North);
        }
    }

    #[test]
    fn starts_at_origin_facing_north() {
        let walker = GridWalker::new();
        assert_eq!(walker.position, Position::origin());
        assert_eq!(walker.direction, Direction::North);
        assert!(walker.visited.contains(&Position::origin()));
    }

    #[test]
    fn follow_then_finish_matches_run() {
        let instructions = crate::instruction::parse_line("R8, R4, R4, R8").unwrap();
        let mut walker = GridWalker::new();
        for &instruction in &instructions {
            walker.follow(instruction);
        }
        assert_eq!(walker.finish(), GridWalker::run(instructions));
    }

    #[test]
    fn empty_walk() {
        let result = GridWalker::run(vec![]);
        assert_eq!(result.final_position, Position::origin());
        assert_eq!(result.first_revisit, None);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn pure_turn_does_not_revisit_origin() {
        let result = walk("R0");
        assert_eq!(result.final_position, Position::origin());
        assert_eq!(result.first_revisit, None);
    }

    #[test]
    fn right_then_left() {
        let result = walk("R2, L1");
        assert_eq!(result.final_position, at(2, 1));
        assert_eq!(result.final_position.distance(), 3);
        assert_eq!(result.first_revisit, None);
        assert_eq!(result.steps, 3);
    }

    #[test]
    fn crosses_own_path_mid_stride() {
        let result = walk("R8, R4, R4, R8");
        assert_eq!(result.first_revisit, Some(at(4, 0)));
        assert_eq!(result.first_revisit.map(Position::distance), Some(4));
        assert_eq!(result.final_position, at(4, 4));
    }

    #[test]
    fn revisit_on_last_step() {
        let result = walk("R1, R1, R1, R1");
        assert_eq!(result.first_revisit, Some(Position::origin()));
        assert_eq!(result.final_position, Position::origin());
    }

    #[test]
    fn later_revisits_are_ignored() {
        let result = walk("R1, R1, R1, R1, R1, R1, R1, R2");
        assert_eq!(result.first_revisit, Some(Position::origin()));
        assert_eq!(result.final_position, at(0, 1));
    }

    #[test_case("L1" => at(-1, 0))]
    #[test_case("R0, R0, R1" => at(-1, 0))]
    #[test_case("L0, L0, L0, L0, R1" => at(1, 0))]
    #[test_case("L3, L3" => at(-3, -3))]
    fn final_positions(line: &str) -> Position {
        walk(line).final_position
    }

    #[test]
    fn same_net_path_same_destination() {
        assert_eq!(
            walk("R2, L1").final_position,
            walk("R1, L0, R1, L1").final_position
        );
    }

    #[test]
    fn fresh_walkers_do_not_share_state() {
        let line = "R5, L5, R5, R3, L2, R8, R4, R4, R8";
        assert_eq!(walk(line), walk(line));
    }

    #[test]
    fn long_walk_is_not_capped() {
        let instructions = crate::instruction::parse_line("R20000, R1, R20000").unwrap();
        let result = GridWalker::run(instructions);
        assert_eq!(result.steps, 40001);
        assert_eq!(result.final_position, at(0, -1));
        assert_eq!(result.first_revisit, None);
    }
}
