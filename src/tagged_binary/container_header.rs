//! Header section of a tagged field-snapshot container.
//!
//! The header is everything before the first zone record:
//!
//! * **magic** – eight bytes, must start with [`CONTAINER_MAGIC_PREFIX`] (`#!TDV`),
//! * **version** – eight bytes, skipped without interpretation,
//! * **title** – code point string (see [`code_point_string`]),
//! * **variable count** – little-endian `u32`,
//! * **variable names** – that many code point strings, in column order.
//!
//! The parse either yields the full header or an error; a variable table cut
//! short by the end of the buffer is reported as
//! [`SimhistError::TruncatedRead`], never as a shorter list.
use std::fmt;

use nom::{bytes::complete::take, multi::count, number::complete::le_u32, Parser};

use crate::constants::{CONTAINER_MAGIC_LEN, CONTAINER_MAGIC_PREFIX, CONTAINER_VERSION_LEN};
use crate::simhist_errors::SimhistError;

use super::code_point_string::code_point_string;

/// One column of the zone data, identified by name and ordinal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub position: usize,
}

/// Decoded header of a tagged container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Magic field as text, trailing NULs removed (e.g. `"#!TDV112"`).
    pub magic: String,
    pub title: String,
    pub variables: Vec<Variable>,
}

impl ContainerHeader {
    /// Decode the header at the start of `input`.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: the container bytes from offset 0.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)` on success, `remaining` starting at the zone section.
    /// * [`SimhistError::BadMagic`] if the magic does not start with `#!TDV`.
    /// * [`SimhistError::TruncatedRead`] if any field runs past the end of `input`.
    pub fn decode(input: &[u8]) -> Result<(&[u8], Self), SimhistError> {
        let (input, magic) = take(CONTAINER_MAGIC_LEN)(input)
            .map_err(|e| SimhistError::from_nom(e, "container magic"))?;
        if !magic.starts_with(CONTAINER_MAGIC_PREFIX) {
            return Err(SimhistError::BadMagic(
                String::from_utf8_lossy(magic).to_string(),
            ));
        }

        let (input, _version) = take(CONTAINER_VERSION_LEN)(input)
            .map_err(|e| SimhistError::from_nom(e, "container version"))?;
        let (input, title) =
            code_point_string(input).map_err(|e| SimhistError::from_nom(e, "title"))?;
        let (input, n_vars) =
            le_u32(input).map_err(|e| SimhistError::from_nom(e, "variable count"))?;
        let (input, names) = count(code_point_string, n_vars as usize)
            .parse(input)
            .map_err(|e| SimhistError::from_nom(e, "variable names"))?;

        let variables = names
            .into_iter()
            .enumerate()
            .map(|(position, name)| Variable { name, position })
            .collect();

        Ok((
            input,
            ContainerHeader {
                magic: String::from_utf8_lossy(magic)
                    .trim_end_matches('\0')
                    .to_string(),
                title,
                variables,
            },
        ))
    }

    /// Variable names in column order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }
}

impl fmt::Display for ContainerHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 14;
        const VALUE_WIDTH: usize = 40;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "Magic",
            self.magic,
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "Title",
            self.title,
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")?;
        for variable in &self.variables {
            writeln!(
                f,
                "| {:<label$}| {:<value$}|",
                format!("var {}", variable.position),
                variable.name,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}
