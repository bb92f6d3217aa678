//! Letter tables, indexed `A..=Z`.

pub(crate) type LetterTable = [u32; 26];

pub(crate) const ALW: LetterTable = [
    1, 20, 13, 6, 25, 18, 11, 4, 23, 16, 9, 2, 21, 14, 7, 26, 19, 12, 5, 24, 17, 10, 3, 22, 15, 8,
];

pub(crate) const TRIGRAMMATON: LetterTable = [
    5, 20, 2, 23, 13, 12, 11, 3, 0, 7, 17, 1, 21, 24, 10, 4, 16, 14, 15, 9, 25, 22, 8, 6, 18, 19,
];

// I/J and U/V share a value.
pub(crate) const BACONIAN: LetterTable = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 23,
];

pub(crate) const CHALDEAN: LetterTable = [
    1, 2, 3, 4, 5, 8, 3, 5, 1, 1, 2, 3, 4, 5, 7, 8, 1, 2, 3, 4, 6, 6, 6, 5, 1, 7,
];

pub(crate) const HEXADECIMAL_POSITION: LetterTable = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3, 4, 5, 6, 7, 8, 10,
];

pub(crate) const SUMERIAN: LetterTable = [
    6, 12, 18, 24, 30, 36, 42, 48, 54, 60, 66, 72, 78, 84, 90, 96, 102, 108, 114, 120, 126, 132,
    138, 144, 150, 156,
];

pub(crate) const PHONE_KEYPAD: LetterTable = [
    2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 9, 9,
];

pub(crate) const SOLFEGE: LetterTable = [
    1, 2, 3, 4, 5, 6, 7, 1, 2, 3, 4, 5, 6, 7, 1, 2, 3, 4, 5, 6, 7, 1, 2, 3, 4, 5,
];

pub(crate) const ZODIAC: LetterTable = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2,
];

pub(crate) const JEWISH: LetterTable = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 200, 300, 400, 500, 600,
    700, 800,
];

/// Row + column in the 5x5 grid with I and J sharing a cell.
pub(crate) const POLYBIUS_SQUARE: LetterTable = [
    2, 3, 4, 5, 6, 3, 4, 5, 6, 6, 7, 4, 5, 6, 7, 8, 5, 6, 7, 8, 9, 6, 7, 8, 9, 10,
];

/// The first 26 primes, one per letter.
pub(crate) const LETTER_PRIMES: LetterTable = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101,
];
