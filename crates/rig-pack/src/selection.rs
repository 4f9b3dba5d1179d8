use anyhow::{Context, Result};
use rig_core::PartSelection;

/// Load a part selection file (`category slug -> part record`). The YAML
/// shape mirrors the data layer's wire format:
///
/// ```yaml
/// cpu:
///   name: Ryzen 7 9700X
///   brand: AMD
///   price: 359.0
///   socket: AM5
///   draw: 65
/// ```
pub fn load_selection(path: &std::path::Path) -> Result<PartSelection> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read selection: {}", path.display()))?;
    parse_selection(&s)
}

pub fn parse_selection(yaml: &str) -> Result<PartSelection> {
    let selection: PartSelection =
        serde_yaml::from_str(yaml).with_context(|| "parse selection yaml")?;
    Ok(selection)
}
