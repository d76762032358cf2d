use crate::error::{CliError, Result};
use phonanim::engine::selection::{FrequencyUnit, ModeSelection};

/// Parses a supercell flag value of the form "NA,NB,NC".
pub fn parse_supercell(value: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(CliError::Argument(format!(
            "Supercell must be three comma-separated integers, got '{}'",
            value
        )));
    }

    let mut dims = [0usize; 3];
    for (slot, part) in dims.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| {
            CliError::Argument(format!("Invalid supercell dimension '{}'", part))
        })?;
    }

    Ok((dims[0], dims[1], dims[2]))
}

fn parse_open_end<T: std::str::FromStr>(part: &str, selector: &str) -> Result<Option<T>> {
    if part.is_empty() || part == "-" {
        return Ok(None);
    }
    part.parse().map(Some).map_err(|_| {
        CliError::Argument(format!(
            "Invalid bound '{}' in mode selector '{}'",
            part, selector
        ))
    })
}

/// Parses a mode-selector flag value.
///
/// The format is `KIND:MIN:MAX` where KIND is `index`, `thz` or `invcm` and
/// either bound may be `-` to leave that end open.
pub fn parse_mode_selection(value: &str) -> Result<ModeSelection> {
    let parts: Vec<&str> = value.split(':').collect();
    let (kind, min, max) = match parts.as_slice() {
        [kind, min, max] => (*kind, *min, *max),
        _ => {
            return Err(CliError::Argument(format!(
                "Mode selector must be 'KIND:MIN:MAX', got '{}'",
                value
            )));
        }
    };

    match kind {
        "index" => Ok(ModeSelection::Index {
            min: parse_open_end(min, value)?,
            max: parse_open_end(max, value)?,
        }),
        "thz" => Ok(ModeSelection::Frequency {
            unit: FrequencyUnit::Thz,
            min: parse_open_end(min, value)?,
            max: parse_open_end(max, value)?,
        }),
        "invcm" => Ok(ModeSelection::Frequency {
            unit: FrequencyUnit::InvCm,
            min: parse_open_end(min, value)?,
            max: parse_open_end(max, value)?,
        }),
        _ => Err(CliError::Argument(format!(
            "Unknown mode selector kind '{}'; expected 'index', 'thz' or 'invcm'",
            kind
        ))),
    }
}
