//! Block-art glyphs for the nalssi temperature readout.

use nalssi_core::Units;

/// Large 7-segment style digits (7 lines tall, 6 chars wide)
pub const DIGITS: [[&str; 7]; 10] = [
    // 0
    [
        " ████ ",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 1
    [
        "  ██  ",
        " ███  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        " ████ ",
    ],
    // 2
    [
        " ████ ",
        "██  ██",
        "    ██",
        "  ██  ",
        " ██   ",
        "██    ",
        "██████",
    ],
    // 3
    [
        " ████ ",
        "██  ██",
        "    ██",
        "  ███ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // 4
    [
        "██  ██",
        "██  ██",
        "██  ██",
        "██████",
        "    ██",
        "    ██",
        "    ██",
    ],
    // 5
    [
        "██████",
        "██    ",
        "██    ",
        "█████ ",
        "    ██",
        "██  ██",
        " ████ ",
    ],
    // 6
    [
        " ████ ",
        "██    ",
        "██    ",
        "█████ ",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 7
    [
        "██████",
        "    ██",
        "   ██ ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
        "  ██  ",
    ],
    // 8
    [
        " ████ ",
        "██  ██",
        "██  ██",
        " ████ ",
        "██  ██",
        "██  ██",
        " ████ ",
    ],
    // 9
    [
        " ████ ",
        "██  ██",
        "██  ██",
        " █████",
        "    ██",
        "    ██",
        " ████ ",
    ],
];

/// Minus sign for temperatures below zero (7 lines tall, 6 chars wide)
pub const MINUS: [&str; 7] = [
    "      ",
    "      ",
    "      ",
    " ████ ",
    "      ",
    "      ",
    "      ",
];

/// Degree mark (7 lines tall, 4 chars wide)
pub const DEGREE: [&str; 7] = [" ██ ", "█  █", " ██ ", "    ", "    ", "    ", "    "];

/// Letter C for Celsius
pub const LETTER_C: [&str; 7] = [
    " ████ ",
    "██  ██",
    "██    ",
    "██    ",
    "██    ",
    "██  ██",
    " ████ ",
];

/// Letter F for Fahrenheit
pub const LETTER_F: [&str; 7] = [
    "██████",
    "██    ",
    "██    ",
    "█████ ",
    "██    ",
    "██    ",
    "██    ",
];

/// Build the large block-art temperature string, sign and unit included.
pub fn build_temp_art(temp: i32, units: Units) -> Vec<String> {
    let magnitude = temp.unsigned_abs();
    let digits: Vec<usize> = if magnitude == 0 {
        vec![0]
    } else {
        let mut ds = Vec::new();
        let mut rest = magnitude;
        while rest > 0 {
            ds.push((rest % 10) as usize);
            rest /= 10;
        }
        ds.reverse();
        ds
    };

    let unit_glyph = match units {
        Units::Celsius => &LETTER_C,
        Units::Fahrenheit => &LETTER_F,
    };

    let mut lines = Vec::with_capacity(7);
    for row in 0..7 {
        let mut line = String::new();

        if temp < 0 {
            line.push_str(MINUS[row]);
            line.push(' ');
        }
        for &digit in &digits {
            line.push_str(DIGITS[digit][row]);
            line.push(' ');
        }
        line.push_str(DEGREE[row]);
        line.push(' ');
        line.push_str(unit_glyph[row]);

        lines.push(line);
    }

    lines
}
