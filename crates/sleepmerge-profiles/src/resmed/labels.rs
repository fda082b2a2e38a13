// Canonical channel names and the spellings ResMed firmware writes for them.
// Localized firmware uses translated labels with the same suffixes.

pub const LABELS: &[(&str, &[&str])] = &[
    ("Flow", &["Flow.40ms", "Flow 40ms", "Débit.40ms", "Flujo.40ms", "Fluss.40ms"]),
    ("Pressure", &["Press.2s", "Pressure.2s", "Pression.2s", "Presión.2s", "Druck.2s"]),
    ("Mask Pressure", &["MaskPress.2s", "Mask Pres.2s"]),
    ("Leak", &["Leak.2s", "Fuite.2s", "Fuga.2s", "Leck.2s"]),
    ("Resp Rate", &["RespRate.2s"]),
    ("Tidal Volume", &["TidVol.2s"]),
    ("Minute Vent", &["MinVent.2s"]),
    ("Snore", &["Snore.2s"]),
    ("Flow Limitation", &["FlowLim.2s"]),
    ("EPR Pressure", &["EPRPress.2s", "EprPress.2s"]),
    ("Target Vent", &["TgtVent.2s"]),
    ("SpO2", &["SpO2.1s", "SpO2"]),
    ("Pulse", &["Pulse.1s", "Pulse"]),
];

/// Sensors an oximeter attachment provides; absent when nothing was plugged in.
pub const OPTIONAL_SENSORS: &[&str] = &["spo2", "pulse"];
