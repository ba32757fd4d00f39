//! Core value types: colours, palettes, codes and populations.
//!
//! A [`Code`] is a fixed-length row of [`Color`] pegs. Colours are plain
//! indices; the [`Palette`] they index into owns the human-readable names,
//! so the alphabet can be swapped without touching the algorithm.

use crate::error::{GaError, Result};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One peg colour, identified by its position in a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u8);

impl Color {
    /// Index of this colour in its palette.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The finite colour alphabet codes are drawn from.
///
/// # Examples
///
/// ```
/// use mastermind_ga::ga::Palette;
///
/// let palette = Palette::letters();
/// let code = palette.parse_code("R G G B").unwrap();
/// assert_eq!(palette.render(&code), "R G G B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    names: Vec<String>,
}

impl Palette {
    /// Largest palette a [`Color`] can index.
    pub const MAX_COLORS: usize = u8::MAX as usize + 1;

    /// Builds a palette from distinct colour names.
    ///
    /// Fails if fewer than two names are given (mutation needs an
    /// alternative colour), more than [`MAX_COLORS`](Self::MAX_COLORS),
    /// a name is empty or contains whitespace, or a name repeats.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < 2 {
            return Err(GaError::invalid(
                "palette",
                format!("needs at least 2 colours, got {}", names.len()),
            ));
        }
        if names.len() > Self::MAX_COLORS {
            return Err(GaError::invalid(
                "palette",
                format!("supports at most {} colours, got {}", Self::MAX_COLORS, names.len()),
            ));
        }
        for (i, name) in names.iter().enumerate() {
            // names must survive a render / parse_code round trip
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(GaError::invalid(
                    "palette",
                    format!("colour names must be non-empty words, got {name:?}"),
                ));
            }
            if names[..i].contains(name) {
                return Err(GaError::invalid("palette", format!("duplicate colour {name:?}")));
            }
        }
        Ok(Self { names })
    }

    /// The six named colours of the board game.
    pub fn classic() -> Self {
        Self::from_static(&["Red", "Blue", "Green", "Yellow", "Black", "White"])
    }

    /// Six single-letter colours: red, green, blue, yellow, orange, purple.
    pub fn letters() -> Self {
        Self::from_static(&["R", "G", "B", "Y", "O", "P"])
    }

    fn from_static(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of colours.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false` for a validated palette.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All colours in palette order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.names.len()).map(|i| Color(i as u8))
    }

    /// Name of a colour, or `None` if it does not belong to this palette.
    pub fn name(&self, color: Color) -> Option<&str> {
        self.names.get(color.index()).map(String::as_str)
    }

    /// Looks a colour up by name.
    pub fn color(&self, name: &str) -> Result<Color> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| Color(i as u8))
            .ok_or_else(|| GaError::UnknownColor(name.to_string()))
    }

    /// Parses whitespace-separated colour names into a code.
    pub fn parse_code(&self, text: &str) -> Result<Code> {
        text.split_whitespace()
            .map(|name| self.color(name))
            .collect::<Result<Vec<_>>>()
            .map(Code::new)
    }

    /// Renders a code as space-separated colour names.
    ///
    /// Colours outside the palette render as `?`.
    pub fn render(&self, code: &Code) -> String {
        code.iter()
            .map(|&c| self.name(c).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// An ordered row of pegs: either the hidden secret or a candidate guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Code(Vec<Color>);

impl Code {
    pub fn new(pegs: Vec<Color>) -> Self {
        Self(pegs)
    }

    /// Number of pegs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// Returns a copy of this code with position `index` set to `color`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn with_peg(&self, index: usize, color: Color) -> Self {
        let mut pegs = self.0.clone();
        pegs[index] = color;
        Self(pegs)
    }
}

impl From<Vec<Color>> for Code {
    fn from(pegs: Vec<Color>) -> Self {
        Self(pegs)
    }
}

impl Index<usize> for Code {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Code {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The evolving set of candidate codes.
///
/// Each individual lives in a numbered slot; the slot number is its stable
/// identity. Survivors keep their slot from one generation to the next and
/// offspring are written into the slots that were vacated, so a renderer can
/// highlight the same individual across generations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Population {
    members: Vec<Code>,
}

impl Population {
    pub fn new(members: Vec<Code>) -> Self {
        Self { members }
    }

    /// Rebuilds a population of `size` slots.
    ///
    /// Every `(slot, code)` survivor is placed in its own slot; `offspring`
    /// is called once for each remaining slot, in ascending slot order.
    ///
    /// # Panics
    /// Panics if a survivor slot is `>= size`.
    pub fn refill<F>(size: usize, survivors: Vec<(usize, Code)>, mut offspring: F) -> Self
    where
        F: FnMut(usize) -> Code,
    {
        let mut slots: Vec<Option<Code>> = vec![None; size];
        for (slot, code) in survivors {
            slots[slot] = Some(code);
        }
        let members = slots
            .into_iter()
            .enumerate()
            .map(|(slot, code)| code.unwrap_or_else(|| offspring(slot)))
            .collect();
        Self { members }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The individual in `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&Code> {
        self.members.get(slot)
    }

    /// Individuals in slot order.
    pub fn codes(&self) -> &[Code] {
        &self.members
    }

    /// `(slot, code)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Code)> {
        self.members.iter().enumerate()
    }
}

impl Index<usize> for Population {
    type Output = Code;

    fn index(&self, slot: usize) -> &Code {
        &self.members[slot]
    }
}
