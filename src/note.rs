//! Static note table: name and equal-temperament center frequency of every MIDI key.
//!
//! Tuned with A4 = key 69 = 440 Hz; octaves are numbered so that key 60 is C4 (middle C).

/// The name and center frequency of a MIDI key.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct NoteInfo {
    /// Scientific pitch name, using sharps (for example `"C#4"`).
    pub name: &'static str,
    /// Center frequency in Hz.
    pub frequency: f64,
}

macro_rules! note {
    ($name:expr, $freq:expr) => {
        NoteInfo {
            name: $name,
            frequency: $freq,
        }
    };
}

/// Every MIDI key from 0 to 127, indexed by key number.
pub static NOTE_TABLE: [NoteInfo; 128] = [
    note!("C-1", 8.175799),
    note!("C#-1", 8.661957),
    note!("D-1", 9.177024),
    note!("D#-1", 9.722718),
    note!("E-1", 10.300861),
    note!("F-1", 10.913382),
    note!("F#-1", 11.562326),
    note!("G-1", 12.249857),
    note!("G#-1", 12.978272),
    note!("A-1", 13.75),
    note!("A#-1", 14.567618),
    note!("B-1", 15.433853),
    note!("C0", 16.351598),
    note!("C#0", 17.323914),
    note!("D0", 18.354048),
    note!("D#0", 19.445436),
    note!("E0", 20.601722),
    note!("F0", 21.826764),
    note!("F#0", 23.124651),
    note!("G0", 24.499715),
    note!("G#0", 25.956544),
    note!("A0", 27.5),
    note!("A#0", 29.135235),
    note!("B0", 30.867706),
    note!("C1", 32.703196),
    note!("C#1", 34.647829),
    note!("D1", 36.708096),
    note!("D#1", 38.890873),
    note!("E1", 41.203445),
    note!("F1", 43.653529),
    note!("F#1", 46.249303),
    note!("G1", 48.999429),
    note!("G#1", 51.913087),
    note!("A1", 55.0),
    note!("A#1", 58.27047),
    note!("B1", 61.735413),
    note!("C2", 65.406391),
    note!("C#2", 69.295658),
    note!("D2", 73.416192),
    note!("D#2", 77.781746),
    note!("E2", 82.406889),
    note!("F2", 87.307058),
    note!("F#2", 92.498606),
    note!("G2", 97.998859),
    note!("G#2", 103.826174),
    note!("A2", 110.0),
    note!("A#2", 116.54094),
    note!("B2", 123.470825),
    note!("C3", 130.812783),
    note!("C#3", 138.591315),
    note!("D3", 146.832384),
    note!("D#3", 155.563492),
    note!("E3", 164.813778),
    note!("F3", 174.614116),
    note!("F#3", 184.997211),
    note!("G3", 195.997718),
    note!("G#3", 207.652349),
    note!("A3", 220.0),
    note!("A#3", 233.081881),
    note!("B3", 246.941651),
    note!("C4", 261.625565),
    note!("C#4", 277.182631),
    note!("D4", 293.664768),
    note!("D#4", 311.126984),
    note!("E4", 329.627557),
    note!("F4", 349.228231),
    note!("F#4", 369.994423),
    note!("G4", 391.995436),
    note!("G#4", 415.304698),
    note!("A4", 440.0),
    note!("A#4", 466.163762),
    note!("B4", 493.883301),
    note!("C5", 523.251131),
    note!("C#5", 554.365262),
    note!("D5", 587.329536),
    note!("D#5", 622.253967),
    note!("E5", 659.255114),
    note!("F5", 698.456463),
    note!("F#5", 739.988845),
    note!("G5", 783.990872),
    note!("G#5", 830.609395),
    note!("A5", 880.0),
    note!("A#5", 932.327523),
    note!("B5", 987.766603),
    note!("C6", 1046.502261),
    note!("C#6", 1108.730524),
    note!("D6", 1174.659072),
    note!("D#6", 1244.507935),
    note!("E6", 1318.510228),
    note!("F6", 1396.912926),
    note!("F#6", 1479.977691),
    note!("G6", 1567.981744),
    note!("G#6", 1661.21879),
    note!("A6", 1760.0),
    note!("A#6", 1864.655046),
    note!("B6", 1975.533205),
    note!("C7", 2093.004522),
    note!("C#7", 2217.461048),
    note!("D7", 2349.318143),
    note!("D#7", 2489.01587),
    note!("E7", 2637.020455),
    note!("F7", 2793.825851),
    note!("F#7", 2959.955382),
    note!("G7", 3135.963488),
    note!("G#7", 3322.437581),
    note!("A7", 3520.0),
    note!("A#7", 3729.310092),
    note!("B7", 3951.06641),
    note!("C8", 4186.009045),
    note!("C#8", 4434.922096),
    note!("D8", 4698.636287),
    note!("D#8", 4978.03174),
    note!("E8", 5274.040911),
    note!("F8", 5587.651703),
    note!("F#8", 5919.910763),
    note!("G8", 6271.926976),
    note!("G#8", 6644.875161),
    note!("A8", 7040.0),
    note!("A#8", 7458.620184),
    note!("B8", 7902.13282),
    note!("C9", 8372.01809),
    note!("C#9", 8869.844191),
    note!("D9", 9397.272573),
    note!("D#9", 9956.063479),
    note!("E9", 10548.081821),
    note!("F9", 11175.303406),
    note!("F#9", 11839.821527),
    note!("G9", 12543.853951),
];
