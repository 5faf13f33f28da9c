/// Camp-to-zone network diagram
/// Distances label the edges only; they play no part in allocation

use crate::models::Zone;
use crate::reporting::format_quantity;

pub const CAMP_LABEL: &str = "Camp 0";

pub fn network_diagram(zones: &[Zone]) -> String {
    let mut out = format!("[{}]\n", CAMP_LABEL);

    if zones.is_empty() {
        out.push_str("   (no zones)\n");
        return out;
    }

    for (i, zone) in zones.iter().enumerate() {
        let branch = if i + 1 == zones.len() { '`' } else { '|' };
        out.push_str(&format!(
            "   {}--({})--> Z{}\n",
            branch,
            format_quantity(zone.distance),
            zone.id
        ));
    }
    out
}
