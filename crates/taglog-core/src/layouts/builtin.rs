/// A struct layout as declared in source: name, descriptor, field names.
#[derive(Debug, Clone, Copy)]
pub struct LayoutDefinition {
    pub name: &'static str,
    pub format: &'static str,
    pub field_names: &'static [&'static str],
}

/// u-blox UBX-NAV-PVT payload (92 bytes).
pub const UBX_NAV_PVT: LayoutDefinition = LayoutDefinition {
    name: "UBXNavPVT",
    format: "<IH6BIi4B4i2I5i2I2HIihH",
    field_names: &[
        "iTOW", "year", "month", "day", "hour", "min", "sec", "valid", "tAcc", "nano", "fixType",
        "flags", "flags2", "numSV", "lon", "lat", "height", "hMSL", "hAcc", "vAcc", "velN",
        "velE", "velD", "gSpeed", "headMot", "sAcc", "headAcc", "pDOP", "flags3", "reserved0",
        "headVeh", "magDec", "magAcc",
    ],
};

/// u-blox UBX-NAV-SVIN survey-in payload (40 bytes).
pub const UBX_NAV_SVIN: LayoutDefinition = LayoutDefinition {
    name: "UBXNavSVIN",
    format: "<B3x2I3i3bx2I2B2x",
    field_names: &[
        "version", "iTOW", "dur", "meanX", "meanY", "meanZ", "meanXHP", "meanYHP", "meanZHP",
        "meanAcc", "obs", "valid", "active",
    ],
};

/// Mesh node heartbeat.
pub const NETWORK_DATA: LayoutDefinition = LayoutDefinition {
    name: "NetworkData",
    format: "<IH",
    field_names: &["send_count", "battery_voltage"],
};

pub const BUILTIN_LAYOUTS: &[LayoutDefinition] = &[UBX_NAV_PVT, UBX_NAV_SVIN, NETWORK_DATA];
