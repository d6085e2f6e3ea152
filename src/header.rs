/*!
C header generation for validated register maps.

Each block becomes a `/* Base: <BLOCK> */` section with one `#define` per
register instance holding its absolute offset:

```text
#pragma once
/* Auto-generated from devices/i225.yaml */

/* Base: MAC_CTRL */
#define I225_CTRL            0x00000
#define I225_STATUS          0x00008
```
 */
use crate::regmap::{expand_register, Device, Finding};

/// Name of the header generated for `device`.
pub fn header_file_name(device: &str) -> String {
    format!("{}_regs.h", device.to_lowercase())
}

/// Turns a device or register name into a C identifier fragment.
fn macro_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Renders the header for `device`, prefixing every macro with `name`.
///
/// Fails on the first register whose offset cannot be computed; devices that
/// passed validation always render.
pub fn render_header(device: &Device, name: &str, source: &str) -> Result<String, Finding> {
    let prefix = macro_name(name);
    let mut out = String::new();
    out.push_str("#pragma once\n");
    out.push_str(&format!("/* Auto-generated from {} */\n", source));

    for blk in device.blocks() {
        let base = blk.base().map_err(|error| Finding::MalformedNumber {
            path: format!("{}.{}", name, blk.name),
            attr: "base",
            error,
        })?;

        out.push_str(&format!("\n/* Base: {} */\n", blk.name));
        for reg in blk.registers() {
            let instances =
                expand_register(reg, base).map_err(|e| e.into_finding(name, blk, reg))?;
            for inst in instances {
                let ident = format!("{}_{}", prefix, macro_name(&inst.name));
                out.push_str(&format!("#define {:<20} 0x{:05X}\n", ident, inst.offset));
            }
        }
    }
    Ok(out)
}
