// mpadec
// Copyright (c) 2019-2026 The mpadec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Huffman codebooks for the spectral samples of layer 3. Derived from ISO/IEC 11172-3 Table B.7.

use mpadec_core::io::vlc::Codebook;

use lazy_static::lazy_static;

#[rustfmt::skip]
const HUFFMAN_CODES_1: [u32; 4] = [
    0x00001, 0x00001, 0x00001, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_1: [u8; 4] = [
     1,  3,  2,  3,
];

#[rustfmt::skip]
const HUFFMAN_CODES_2: [u32; 9] = [
    0x00001, 0x00002, 0x00001, 0x00003, 0x00001, 0x00001, 0x00003, 0x00002,
    0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_2: [u8; 9] = [
     1,  3,  6,  3,  3,  5,  5,  5,  6,
];

#[rustfmt::skip]
const HUFFMAN_CODES_3: [u32; 9] = [
    0x00003, 0x00002, 0x00001, 0x00001, 0x00001, 0x00001, 0x00003, 0x00002,
    0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_3: [u8; 9] = [
     2,  2,  6,  3,  2,  5,  5,  5,  6,
];

#[rustfmt::skip]
const HUFFMAN_CODES_5: [u32; 16] = [
    0x00001, 0x00002, 0x00006, 0x00005, 0x00003, 0x00001, 0x00004, 0x00004,
    0x00007, 0x00005, 0x00007, 0x00001, 0x00006, 0x00001, 0x00001, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_5: [u8; 16] = [
     1,  3,  6,  7,  3,  3,  6,  7,  6,  6,  7,  8,  7,  6,  7,  8,
];

#[rustfmt::skip]
const HUFFMAN_CODES_6: [u32; 16] = [
    0x00007, 0x00003, 0x00005, 0x00001, 0x00006, 0x00002, 0x00003, 0x00002,
    0x00005, 0x00004, 0x00004, 0x00001, 0x00003, 0x00003, 0x00002, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_6: [u8; 16] = [
     3,  3,  5,  7,  3,  2,  4,  5,  4,  4,  5,  6,  6,  5,  6,  7,
];

#[rustfmt::skip]
const HUFFMAN_CODES_7: [u32; 36] = [
    0x00001, 0x00002, 0x0000a, 0x00013, 0x00010, 0x0000a, 0x00003, 0x00003,
    0x00007, 0x0000a, 0x00005, 0x00003, 0x0000b, 0x00004, 0x0000d, 0x00011,
    0x00008, 0x00004, 0x0000c, 0x0000b, 0x00012, 0x0000f, 0x0000b, 0x00002,
    0x00007, 0x00006, 0x00009, 0x0000e, 0x00003, 0x00001, 0x00006, 0x00004,
    0x00005, 0x00003, 0x00002, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_7: [u8; 36] = [
     1,  3,  6,  8,  8,  9,  3,  4,  6,  7,  7,  8,  6,  5,  7,  8,
     8,  9,  7,  7,  8,  9,  9,  9,  7,  7,  8,  9,  9, 10,  8,  8,
     9, 10, 10, 10,
];

#[rustfmt::skip]
const HUFFMAN_CODES_8: [u32; 36] = [
    0x00003, 0x00004, 0x00006, 0x00012, 0x0000c, 0x00005, 0x00005, 0x00001,
    0x00002, 0x00010, 0x00009, 0x00003, 0x00007, 0x00003, 0x00005, 0x0000e,
    0x00007, 0x00003, 0x00013, 0x00011, 0x0000f, 0x0000d, 0x0000a, 0x00004,
    0x0000d, 0x00005, 0x00008, 0x0000b, 0x00005, 0x00001, 0x0000c, 0x00004,
    0x00004, 0x00001, 0x00001, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_8: [u8; 36] = [
     2,  3,  6,  8,  8,  9,  3,  2,  4,  8,  8,  8,  6,  4,  6,  8,
     8,  9,  8,  8,  8,  9,  9, 10,  8,  7,  8,  9, 10, 10,  9,  8,
     9,  9, 11, 11,
];

#[rustfmt::skip]
const HUFFMAN_CODES_9: [u32; 36] = [
    0x00007, 0x00005, 0x00009, 0x0000e, 0x0000f, 0x00007, 0x00006, 0x00004,
    0x00005, 0x00005, 0x00006, 0x00007, 0x00007, 0x00006, 0x00008, 0x00008,
    0x00008, 0x00005, 0x0000f, 0x00006, 0x00009, 0x0000a, 0x00005, 0x00001,
    0x0000b, 0x00007, 0x00009, 0x00006, 0x00004, 0x00001, 0x0000e, 0x00004,
    0x00006, 0x00002, 0x00006, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_9: [u8; 36] = [
     3,  3,  5,  6,  8,  9,  3,  3,  4,  5,  6,  8,  4,  4,  5,  6,
     7,  8,  6,  5,  6,  7,  7,  8,  7,  6,  7,  7,  8,  9,  8,  7,
     8,  8,  9,  9,
];

#[rustfmt::skip]
const HUFFMAN_CODES_10: [u32; 64] = [
    0x00001, 0x00002, 0x0000a, 0x00017, 0x00023, 0x0001e, 0x0000c, 0x00011,
    0x00003, 0x00003, 0x00008, 0x0000c, 0x00012, 0x00015, 0x0000c, 0x00007,
    0x0000b, 0x00009, 0x0000f, 0x00015, 0x00020, 0x00028, 0x00013, 0x00006,
    0x0000e, 0x0000d, 0x00016, 0x00022, 0x0002e, 0x00017, 0x00012, 0x00007,
    0x00014, 0x00013, 0x00021, 0x0002f, 0x0001b, 0x00016, 0x00009, 0x00003,
    0x0001f, 0x00016, 0x00029, 0x0001a, 0x00015, 0x00014, 0x00005, 0x00003,
    0x0000e, 0x0000d, 0x0000a, 0x0000b, 0x00010, 0x00006, 0x00005, 0x00001,
    0x00009, 0x00008, 0x00007, 0x00008, 0x00004, 0x00004, 0x00002, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_10: [u8; 64] = [
     1,  3,  6,  8,  9,  9,  9, 10,  3,  4,  6,  7,  8,  9,  8,  8,
     6,  6,  7,  8,  9, 10,  9,  9,  7,  7,  8,  9, 10, 10,  9, 10,
     8,  8,  9, 10, 10, 10, 10, 10,  9,  9, 10, 10, 11, 11, 10, 11,
     8,  8,  9, 10, 10, 10, 11, 11,  9,  8,  9, 10, 10, 11, 11, 11,
];

#[rustfmt::skip]
const HUFFMAN_CODES_11: [u32; 64] = [
    0x00003, 0x00004, 0x0000a, 0x00018, 0x00022, 0x00021, 0x00015, 0x0000f,
    0x00005, 0x00003, 0x00004, 0x0000a, 0x00020, 0x00011, 0x0000b, 0x0000a,
    0x0000b, 0x00007, 0x0000d, 0x00012, 0x0001e, 0x0001f, 0x00014, 0x00005,
    0x00019, 0x0000b, 0x00013, 0x0003b, 0x0001b, 0x00012, 0x0000c, 0x00005,
    0x00023, 0x00021, 0x0001f, 0x0003a, 0x0001e, 0x00010, 0x00007, 0x00005,
    0x0001c, 0x0001a, 0x00020, 0x00013, 0x00011, 0x0000f, 0x00008, 0x0000e,
    0x0000e, 0x0000c, 0x00009, 0x0000d, 0x0000e, 0x00009, 0x00004, 0x00001,
    0x0000b, 0x00004, 0x00006, 0x00006, 0x00006, 0x00003, 0x00002, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_11: [u8; 64] = [
     2,  3,  5,  7,  8,  9,  8,  9,  3,  3,  4,  6,  8,  8,  7,  8,
     5,  5,  6,  7,  8,  9,  8,  8,  7,  6,  7,  9,  8, 10,  8,  9,
     8,  8,  8,  9,  9, 10,  9, 10,  8,  8,  9, 10, 10, 11, 10, 11,
     8,  7,  7,  8,  9, 10, 10, 10,  8,  7,  8,  9, 10, 10, 10, 10,
];

#[rustfmt::skip]
const HUFFMAN_CODES_12: [u32; 64] = [
    0x00009, 0x00006, 0x00010, 0x00021, 0x00029, 0x00027, 0x00026, 0x0001a,
    0x00007, 0x00005, 0x00006, 0x00009, 0x00017, 0x00010, 0x0001a, 0x0000b,
    0x00011, 0x00007, 0x0000b, 0x0000e, 0x00015, 0x0001e, 0x0000a, 0x00007,
    0x00011, 0x0000a, 0x0000f, 0x0000c, 0x00012, 0x0001c, 0x0000e, 0x00005,
    0x00020, 0x0000d, 0x00016, 0x00013, 0x00012, 0x00010, 0x00009, 0x00005,
    0x00028, 0x00011, 0x0001f, 0x0001d, 0x00011, 0x0000d, 0x00004, 0x00002,
    0x0001b, 0x0000c, 0x0000b, 0x0000f, 0x0000a, 0x00007, 0x00004, 0x00001,
    0x0001b, 0x0000c, 0x00008, 0x0000c, 0x00006, 0x00003, 0x00001, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_12: [u8; 64] = [
     4,  3,  5,  7,  8,  9,  9,  9,  3,  3,  4,  5,  7,  7,  8,  8,
     5,  4,  5,  6,  7,  8,  7,  8,  6,  5,  6,  6,  7,  8,  8,  8,
     7,  6,  7,  7,  8,  8,  8,  9,  8,  7,  8,  8,  8,  9,  8,  9,
     8,  7,  7,  8,  8,  9,  9, 10,  9,  8,  8,  9,  9,  9,  9, 10,
];

#[rustfmt::skip]
const HUFFMAN_CODES_13: [u32; 256] = [
    0x00001, 0x00005, 0x0000e, 0x00015, 0x00022, 0x00033, 0x0002e, 0x00047,
    0x0002a, 0x00034, 0x00044, 0x00034, 0x00043, 0x0002c, 0x0002b, 0x00013,
    0x00003, 0x00004, 0x0000c, 0x00013, 0x0001f, 0x0001a, 0x0002c, 0x00021,
    0x0001f, 0x00018, 0x00020, 0x00018, 0x0001f, 0x00023, 0x00016, 0x0000e,
    0x0000f, 0x0000d, 0x00017, 0x00024, 0x0003b, 0x00031, 0x0004d, 0x00041,
    0x0001d, 0x00028, 0x0001e, 0x00028, 0x0001b, 0x00021, 0x0002a, 0x00010,
    0x00016, 0x00014, 0x00025, 0x0003d, 0x00038, 0x0004f, 0x00049, 0x00040,
    0x0002b, 0x0004c, 0x00038, 0x00025, 0x0001a, 0x0001f, 0x00019, 0x0000e,
    0x00023, 0x00010, 0x0003c, 0x00039, 0x00061, 0x0004b, 0x00072, 0x0005b,
    0x00036, 0x00049, 0x00037, 0x00029, 0x00030, 0x00035, 0x00017, 0x00018,
    0x0003a, 0x0001b, 0x00032, 0x00060, 0x0004c, 0x00046, 0x0005d, 0x00054,
    0x0004d, 0x0003a, 0x0004f, 0x0001d, 0x0004a, 0x00031, 0x00029, 0x00011,
    0x0002f, 0x0002d, 0x0004e, 0x0004a, 0x00073, 0x0005e, 0x0005a, 0x0004f,
    0x00045, 0x00053, 0x00047, 0x00032, 0x0003b, 0x00026, 0x00024, 0x0000f,
    0x00048, 0x00022, 0x00038, 0x0005f, 0x0005c, 0x00055, 0x0005b, 0x0005a,
    0x00056, 0x00049, 0x0004d, 0x00041, 0x00033, 0x0002c, 0x0002b, 0x0002a,
    0x0002b, 0x00014, 0x0001e, 0x0002c, 0x00037, 0x0004e, 0x00048, 0x00057,
    0x0004e, 0x0003d, 0x0002e, 0x00036, 0x00025, 0x0001e, 0x00014, 0x00010,
    0x00035, 0x00019, 0x00029, 0x00025, 0x0002c, 0x0003b, 0x00036, 0x00051,
    0x00042, 0x0004c, 0x00039, 0x00036, 0x00025, 0x00012, 0x00027, 0x0000b,
    0x00023, 0x00021, 0x0001f, 0x00039, 0x0002a, 0x00052, 0x00048, 0x00050,
    0x0002f, 0x0003a, 0x00037, 0x00015, 0x00016, 0x0001a, 0x00026, 0x00016,
    0x00035, 0x00019, 0x00017, 0x00026, 0x00046, 0x0003c, 0x00033, 0x00024,
    0x00037, 0x0001a, 0x00022, 0x00017, 0x0001b, 0x0000e, 0x00009, 0x00007,
    0x00022, 0x00020, 0x0001c, 0x00027, 0x00031, 0x0004b, 0x0001e, 0x00034,
    0x00030, 0x00028, 0x00034, 0x0001c, 0x00012, 0x00011, 0x00009, 0x00005,
    0x0002d, 0x00015, 0x00022, 0x00040, 0x00038, 0x00032, 0x00031, 0x0002d,
    0x0001f, 0x00013, 0x0000c, 0x0000f, 0x0000a, 0x00007, 0x00006, 0x00003,
    0x00030, 0x00017, 0x00014, 0x00027, 0x00024, 0x00023, 0x00035, 0x00015,
    0x00010, 0x00017, 0x0000d, 0x0000a, 0x00006, 0x00001, 0x00004, 0x00002,
    0x00010, 0x0000f, 0x00011, 0x0001b, 0x00019, 0x00014, 0x0001d, 0x0000b,
    0x00011, 0x0000c, 0x00010, 0x00008, 0x00001, 0x00001, 0x00000, 0x00001,
];

#[rustfmt::skip]
const HUFFMAN_LENS_13: [u8; 256] = [
     1,  4,  6,  7,  8,  9,  9, 10,  9, 10, 11, 11, 12, 12, 13, 13,
     3,  4,  6,  7,  8,  8,  9,  9,  9,  9, 10, 10, 11, 12, 12, 12,
     6,  6,  7,  8,  9,  9, 10, 10,  9, 10, 10, 11, 11, 12, 13, 13,
     7,  7,  8,  9,  9, 10, 10, 10, 10, 11, 11, 11, 11, 12, 13, 13,
     8,  7,  9,  9, 10, 10, 11, 11, 10, 11, 11, 12, 12, 13, 13, 14,
     9,  8,  9, 10, 10, 10, 11, 11, 11, 11, 12, 11, 13, 13, 14, 14,
     9,  9, 10, 10, 11, 11, 11, 11, 11, 12, 12, 12, 13, 13, 14, 14,
    10,  9, 10, 11, 11, 11, 12, 12, 12, 12, 13, 13, 13, 14, 16, 16,
     9,  8,  9, 10, 10, 11, 11, 12, 12, 12, 12, 13, 13, 14, 15, 15,
    10,  9, 10, 10, 11, 11, 11, 13, 12, 13, 13, 14, 14, 14, 16, 15,
    10, 10, 10, 11, 11, 12, 12, 13, 12, 13, 14, 13, 14, 15, 16, 17,
    11, 10, 10, 11, 12, 12, 12, 12, 13, 13, 13, 14, 15, 15, 15, 16,
    11, 11, 11, 12, 12, 13, 12, 13, 14, 14, 15, 15, 15, 16, 16, 16,
    12, 11, 12, 13, 13, 13, 14, 14, 14, 14, 14, 15, 16, 15, 16, 16,
    13, 12, 12, 13, 13, 13, 15, 14, 14, 17, 15, 15, 15, 17, 16, 16,
    12, 12, 13, 14, 14, 14, 15, 14, 15, 15, 16, 16, 19, 18, 19, 16,
];

#[rustfmt::skip]
const HUFFMAN_CODES_15: [u32; 256] = [
    0x00007, 0x0000c, 0x00012, 0x00035, 0x0002f, 0x0004c, 0x0007c, 0x0006c,
    0x00059, 0x0007b, 0x0006c, 0x00077, 0x0006b, 0x00051, 0x0007a, 0x0003f,
    0x0000d, 0x00005, 0x00010, 0x0001b, 0x0002e, 0x00024, 0x0003d, 0x00033,
    0x0002a, 0x00046, 0x00034, 0x00053, 0x00041, 0x00029, 0x0003b, 0x00024,
    0x00013, 0x00011, 0x0000f, 0x00018, 0x00029, 0x00022, 0x0003b, 0x00030,
    0x00028, 0x00040, 0x00032, 0x0004e, 0x0003e, 0x00050, 0x00038, 0x00021,
    0x0001d, 0x0001c, 0x00019, 0x0002b, 0x00027, 0x0003f, 0x00037, 0x0005d,
    0x0004c, 0x0003b, 0x0005d, 0x00048, 0x00036, 0x0004b, 0x00032, 0x0001d,
    0x00034, 0x00016, 0x0002a, 0x00028, 0x00043, 0x00039, 0x0005f, 0x0004f,
    0x00048, 0x00039, 0x00059, 0x00045, 0x00031, 0x00042, 0x0002e, 0x0001b,
    0x0004d, 0x00025, 0x00023, 0x00042, 0x0003a, 0x00034, 0x0005b, 0x0004a,
    0x0003e, 0x00030, 0x0004f, 0x0003f, 0x0005a, 0x0003e, 0x00028, 0x00026,
    0x0007d, 0x00020, 0x0003c, 0x00038, 0x00032, 0x0005c, 0x0004e, 0x00041,
    0x00037, 0x00057, 0x00047, 0x00033, 0x00049, 0x00033, 0x00046, 0x0001e,
    0x0006d, 0x00035, 0x00031, 0x0005e, 0x00058, 0x0004b, 0x00042, 0x0007a,
    0x0005b, 0x00049, 0x00038, 0x0002a, 0x00040, 0x0002c, 0x00015, 0x00019,
    0x0005a, 0x0002b, 0x00029, 0x0004d, 0x00049, 0x0003f, 0x00038, 0x0005c,
    0x0004d, 0x00042, 0x0002f, 0x00043, 0x00030, 0x00035, 0x00024, 0x00014,
    0x00047, 0x00022, 0x00043, 0x0003c, 0x0003a, 0x00031, 0x00058, 0x0004c,
    0x00043, 0x0006a, 0x00047, 0x00036, 0x00026, 0x00027, 0x00017, 0x0000f,
    0x0006d, 0x00035, 0x00033, 0x0002f, 0x0005a, 0x00052, 0x0003a, 0x00039,
    0x00030, 0x00048, 0x00039, 0x00029, 0x00017, 0x0001b, 0x0003e, 0x00009,
    0x00056, 0x0002a, 0x00028, 0x00025, 0x00046, 0x00040, 0x00034, 0x0002b,
    0x00046, 0x00037, 0x0002a, 0x00019, 0x0001d, 0x00012, 0x0000b, 0x0000b,
    0x00076, 0x00044, 0x0001e, 0x00037, 0x00032, 0x0002e, 0x0004a, 0x00041,
    0x00031, 0x00027, 0x00018, 0x00010, 0x00016, 0x0000d, 0x0000e, 0x00007,
    0x0005b, 0x0002c, 0x00027, 0x00026, 0x00022, 0x0003f, 0x00034, 0x0002d,
    0x0001f, 0x00034, 0x0001c, 0x00013, 0x0000e, 0x00008, 0x00009, 0x00003,
    0x0007b, 0x0003c, 0x0003a, 0x00035, 0x0002f, 0x0002b, 0x00020, 0x00016,
    0x00025, 0x00018, 0x00011, 0x0000c, 0x0000f, 0x0000a, 0x00002, 0x00001,
    0x00047, 0x00025, 0x00022, 0x0001e, 0x0001c, 0x00014, 0x00011, 0x0001a,
    0x00015, 0x00010, 0x0000a, 0x00006, 0x00008, 0x00006, 0x00002, 0x00000,
];

#[rustfmt::skip]
const HUFFMAN_LENS_15: [u8; 256] = [
     3,  4,  5,  7,  7,  8,  9,  9,  9, 10, 10, 11, 11, 11, 12, 13,
     4,  3,  5,  6,  7,  7,  8,  8,  8,  9,  9, 10, 10, 10, 11, 11,
     5,  5,  5,  6,  7,  7,  8,  8,  8,  9,  9, 10, 10, 11, 11, 11,
     6,  6,  6,  7,  7,  8,  8,  9,  9,  9, 10, 10, 10, 11, 11, 11,
     7,  6,  7,  7,  8,  8,  9,  9,  9,  9, 10, 10, 10, 11, 11, 11,
     8,  7,  7,  8,  8,  8,  9,  9,  9,  9, 10, 10, 11, 11, 11, 12,
     9,  7,  8,  8,  8,  9,  9,  9,  9, 10, 10, 10, 11, 11, 12, 12,
     9,  8,  8,  9,  9,  9,  9, 10, 10, 10, 10, 10, 11, 11, 11, 12,
     9,  8,  8,  9,  9,  9,  9, 10, 10, 10, 10, 11, 11, 12, 12, 12,
     9,  8,  9,  9,  9,  9, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12,
    10,  9,  9,  9, 10, 10, 10, 10, 10, 11, 11, 11, 11, 12, 13, 12,
    10,  9,  9,  9, 10, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12, 13,
    11, 10,  9, 10, 10, 10, 11, 11, 11, 11, 11, 11, 12, 12, 13, 13,
    11, 10, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12, 12, 12, 13, 13,
    12, 11, 11, 11, 11, 11, 11, 11, 12, 12, 12, 12, 13, 13, 12, 13,
    12, 11, 11, 11, 11, 11, 11, 12, 12, 12, 12, 12, 13, 13, 13, 13,
];

#[rustfmt::skip]
const HUFFMAN_CODES_16: [u32; 256] = [
    0x00001, 0x00005, 0x0000e, 0x0002c, 0x0004a, 0x0003f, 0x0006e, 0x0005d,
    0x000ac, 0x00095, 0x0008a, 0x000f2, 0x000e1, 0x000c3, 0x00178, 0x00011,
    0x00003, 0x00004, 0x0000c, 0x00014, 0x00023, 0x0003e, 0x00035, 0x0002f,
    0x00053, 0x0004b, 0x00044, 0x00077, 0x000c9, 0x0006b, 0x000cf, 0x00009,
    0x0000f, 0x0000d, 0x00017, 0x00026, 0x00043, 0x0003a, 0x00067, 0x0005a,
    0x000a1, 0x00048, 0x0007f, 0x00075, 0x0006e, 0x000d1, 0x000ce, 0x00010,
    0x0002d, 0x00015, 0x00027, 0x00045, 0x00040, 0x00072, 0x00063, 0x00057,
    0x0009e, 0x0008c, 0x000fc, 0x000d4, 0x000c7, 0x00183, 0x0016d, 0x0001a,
    0x0004b, 0x00024, 0x00044, 0x00041, 0x00073, 0x00065, 0x000b3, 0x000a4,
    0x0009b, 0x00108, 0x000f6, 0x000e2, 0x0018b, 0x0017e, 0x0016a, 0x00009,
    0x00042, 0x0001e, 0x0003b, 0x00038, 0x00066, 0x000b9, 0x000ad, 0x00109,
    0x0008e, 0x000fd, 0x000e8, 0x00190, 0x00184, 0x0017a, 0x001bd, 0x00010,
    0x0006f, 0x00036, 0x00034, 0x00064, 0x000b8, 0x000b2, 0x000a0, 0x00085,
    0x00101, 0x000f4, 0x000e4, 0x000d9, 0x00181, 0x0016e, 0x002cb, 0x0000a,
    0x00062, 0x00030, 0x0005b, 0x00058, 0x000a5, 0x0009d, 0x00094, 0x00105,
    0x000f8, 0x00197, 0x0018d, 0x00174, 0x0017c, 0x00379, 0x00374, 0x00008,
    0x00055, 0x00054, 0x00051, 0x0009f, 0x0009c, 0x0008f, 0x00104, 0x000f9,
    0x001ab, 0x00191, 0x00188, 0x0017f, 0x002d7, 0x002c9, 0x002c4, 0x00007,
    0x0009a, 0x0004c, 0x00049, 0x0008d, 0x00083, 0x00100, 0x000f5, 0x001aa,
    0x00196, 0x0018a, 0x00180, 0x002df, 0x00167, 0x002c6, 0x00160, 0x0000b,
    0x0008b, 0x00081, 0x00043, 0x0007d, 0x000f7, 0x000e9, 0x000e5, 0x000db,
    0x00189, 0x002e7, 0x002e1, 0x002d0, 0x00375, 0x00372, 0x001b7, 0x00004,
    0x000f3, 0x00078, 0x00076, 0x00073, 0x000e3, 0x000df, 0x0018c, 0x002ea,
    0x002e6, 0x002e0, 0x002d1, 0x002c8, 0x002c2, 0x000df, 0x001b4, 0x00006,
    0x000ca, 0x000e0, 0x000de, 0x000da, 0x000d8, 0x00185, 0x00182, 0x0017d,
    0x0016c, 0x00378, 0x001bb, 0x002c3, 0x001b8, 0x001b5, 0x006c0, 0x00004,
    0x002eb, 0x000d3, 0x000d2, 0x000d0, 0x00172, 0x0017b, 0x002de, 0x002d3,
    0x002ca, 0x006c7, 0x00373, 0x0036d, 0x0036c, 0x00d83, 0x00361, 0x00002,
    0x00179, 0x00171, 0x00066, 0x000bb, 0x002d6, 0x002d2, 0x00166, 0x002c7,
    0x002c5, 0x00362, 0x006c6, 0x00367, 0x00d82, 0x00366, 0x001b2, 0x00000,
    0x0000c, 0x0000a, 0x00007, 0x0000b, 0x0000a, 0x00011, 0x0000b, 0x00009,
    0x0000d, 0x0000c, 0x0000a, 0x00007, 0x00005, 0x00003, 0x00001, 0x00003,
];

#[rustfmt::skip]
const HUFFMAN_LENS_16: [u8; 256] = [
     1,  4,  6,  8,  9,  9, 10, 10, 11, 11, 11, 12, 12, 12, 13,  9,
     3,  4,  6,  7,  8,  9,  9,  9, 10, 10, 10, 11, 12, 11, 12,  8,
     6,  6,  7,  8,  9,  9, 10, 10, 11, 10, 11, 11, 11, 12, 12,  9,
     8,  7,  8,  9,  9, 10, 10, 10, 11, 11, 12, 12, 12, 13, 13, 10,
     9,  8,  9,  9, 10, 10, 11, 11, 11, 12, 12, 12, 13, 13, 13,  9,
     9,  8,  9,  9, 10, 11, 11, 12, 11, 12, 12, 13, 13, 13, 14, 10,
    10,  9,  9, 10, 11, 11, 11, 11, 12, 12, 12, 12, 13, 13, 14, 10,
    10,  9, 10, 10, 11, 11, 11, 12, 12, 13, 13, 13, 13, 15, 15, 10,
    10, 10, 10, 11, 11, 11, 12, 12, 13, 13, 13, 13, 14, 14, 14, 10,
    11, 10, 10, 11, 11, 12, 12, 13, 13, 13, 13, 14, 13, 14, 13, 11,
    11, 11, 10, 11, 12, 12, 12, 12, 13, 14, 14, 14, 15, 15, 14, 10,
    12, 11, 11, 11, 12, 12, 13, 14, 14, 14, 14, 14, 14, 13, 14, 11,
    12, 12, 12, 12, 12, 13, 13, 13, 13, 15, 14, 14, 14, 14, 16, 11,
    14, 12, 12, 12, 13, 13, 14, 14, 14, 16, 15, 15, 15, 17, 15, 11,
    13, 13, 11, 12, 14, 14, 13, 14, 14, 15, 16, 15, 17, 15, 14, 11,
     9,  8,  8,  9,  9, 10, 10, 10, 11, 11, 11, 11, 11, 11, 11,  8,
];

#[rustfmt::skip]
const HUFFMAN_CODES_24: [u32; 256] = [
    0x0000f, 0x0000d, 0x0002e, 0x00050, 0x00092, 0x00106, 0x000f8, 0x001b2,
    0x001aa, 0x0029d, 0x0028d, 0x00289, 0x0026d, 0x00205, 0x00408, 0x00058,
    0x0000e, 0x0000c, 0x00015, 0x00026, 0x00047, 0x00082, 0x0007a, 0x000d8,
    0x000d1, 0x000c6, 0x00147, 0x00159, 0x0013f, 0x00129, 0x00117, 0x0002a,
    0x0002f, 0x00016, 0x00029, 0x0004a, 0x00044, 0x00080, 0x00078, 0x000dd,
    0x000cf, 0x000c2, 0x000b6, 0x00154, 0x0013b, 0x00127, 0x0021d, 0x00012,
    0x00051, 0x00027, 0x0004b, 0x00046, 0x00086, 0x0007d, 0x00074, 0x000dc,
    0x000cc, 0x000be, 0x000b2, 0x00145, 0x00137, 0x00125, 0x0010f, 0x00010,
    0x00093, 0x00048, 0x00045, 0x00087, 0x0007f, 0x00076, 0x00070, 0x000d2,
    0x000c8, 0x000bc, 0x00160, 0x00143, 0x00132, 0x0011d, 0x0021c, 0x0000e,
    0x00107, 0x00042, 0x00081, 0x0007e, 0x00077, 0x00072, 0x000d6, 0x000ca,
    0x000c0, 0x000b4, 0x00155, 0x0013d, 0x0012d, 0x00119, 0x00106, 0x0000c,
    0x000f9, 0x0007b, 0x00079, 0x00075, 0x00071, 0x000d7, 0x000ce, 0x000c3,
    0x000b9, 0x0015b, 0x0014a, 0x00134, 0x00123, 0x00110, 0x00208, 0x0000a,
    0x001b3, 0x00073, 0x0006f, 0x0006d, 0x000d3, 0x000cb, 0x000c4, 0x000bb,
    0x00161, 0x0014c, 0x00139, 0x0012a, 0x0011b, 0x00213, 0x0017d, 0x00011,
    0x001ab, 0x000d4, 0x000d0, 0x000cd, 0x000c9, 0x000c1, 0x000ba, 0x000b1,
    0x000a9, 0x00140, 0x0012f, 0x0011e, 0x0010c, 0x00202, 0x00179, 0x00010,
    0x0014f, 0x000c7, 0x000c5, 0x000bf, 0x000bd, 0x000b5, 0x000ae, 0x0014d,
    0x00141, 0x00131, 0x00121, 0x00113, 0x00209, 0x0017b, 0x00173, 0x0000b,
    0x0029c, 0x000b8, 0x000b7, 0x000b3, 0x000af, 0x00158, 0x0014b, 0x0013a,
    0x00130, 0x00122, 0x00115, 0x00212, 0x0017f, 0x00175, 0x0016e, 0x0000a,
    0x0028c, 0x0015a, 0x000ab, 0x000a8, 0x000a4, 0x0013e, 0x00135, 0x0012b,
    0x0011f, 0x00114, 0x00107, 0x00201, 0x00177, 0x00170, 0x0016a, 0x00006,
    0x00288, 0x00142, 0x0013c, 0x00138, 0x00133, 0x0012e, 0x00124, 0x0011c,
    0x0010d, 0x00105, 0x00200, 0x00178, 0x00172, 0x0016c, 0x00167, 0x00004,
    0x0026c, 0x0012c, 0x00128, 0x00126, 0x00120, 0x0011a, 0x00111, 0x0010a,
    0x00203, 0x0017c, 0x00176, 0x00171, 0x0016d, 0x00169, 0x00165, 0x00002,
    0x00409, 0x00118, 0x00116, 0x00112, 0x0010b, 0x00108, 0x00103, 0x0017e,
    0x0017a, 0x00174, 0x0016f, 0x0016b, 0x00168, 0x00166, 0x00164, 0x00000,
    0x0002b, 0x00014, 0x00013, 0x00011, 0x0000f, 0x0000d, 0x0000b, 0x00009,
    0x00007, 0x00006, 0x00004, 0x00007, 0x00005, 0x00003, 0x00001, 0x00003,
];

#[rustfmt::skip]
const HUFFMAN_LENS_24: [u8; 256] = [
     4,  4,  6,  7,  8,  9,  9, 10, 10, 11, 11, 11, 11, 11, 12,  9,
     4,  4,  5,  6,  7,  8,  8,  9,  9,  9, 10, 10, 10, 10, 10,  8,
     6,  5,  6,  7,  7,  8,  8,  9,  9,  9,  9, 10, 10, 10, 11,  7,
     7,  6,  7,  7,  8,  8,  8,  9,  9,  9,  9, 10, 10, 10, 10,  7,
     8,  7,  7,  8,  8,  8,  8,  9,  9,  9, 10, 10, 10, 10, 11,  7,
     9,  7,  8,  8,  8,  8,  9,  9,  9,  9, 10, 10, 10, 10, 10,  7,
     9,  8,  8,  8,  8,  9,  9,  9,  9, 10, 10, 10, 10, 10, 11,  7,
    10,  8,  8,  8,  9,  9,  9,  9, 10, 10, 10, 10, 10, 11, 11,  8,
    10,  9,  9,  9,  9,  9,  9,  9,  9, 10, 10, 10, 10, 11, 11,  8,
    10,  9,  9,  9,  9,  9,  9, 10, 10, 10, 10, 10, 11, 11, 11,  8,
    11,  9,  9,  9,  9, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11,  8,
    11, 10,  9,  9,  9, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11,  8,
    11, 10, 10, 10, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 11,  8,
    11, 10, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 11, 11, 11,  8,
    12, 10, 10, 10, 10, 10, 10, 11, 11, 11, 11, 11, 11, 11, 11,  8,
     8,  7,  7,  7,  7,  7,  7,  7,  7,  7,  7,  8,  8,  8,  8,  4,
];

#[rustfmt::skip]
const QUADS_CODES_A: [u32; 16] = [
    0x00001, 0x00005, 0x00004, 0x00005, 0x00006, 0x00005, 0x00004, 0x00004,
    0x00007, 0x00003, 0x00006, 0x00000, 0x00007, 0x00002, 0x00003, 0x00001,
];

#[rustfmt::skip]
const QUADS_LENS_A: [u8; 16] = [
     1,  4,  4,  5,  4,  6,  5,  6,  4,  5,  5,  6,  5,  6,  6,  6,
];

#[rustfmt::skip]
const QUADS_CODES_B: [u32; 16] = [
    0x0000f, 0x0000e, 0x0000d, 0x0000c, 0x0000b, 0x0000a, 0x00009, 0x00008,
    0x00007, 0x00006, 0x00005, 0x00004, 0x00003, 0x00002, 0x00001, 0x00000,
];

#[rustfmt::skip]
const QUADS_LENS_B: [u8; 16] = [
     4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,
];

/// A Huffman table and the number of values per row, which is the number of distinct values of
/// `y` in a decoded `(x, y)` pair.
struct HuffmanTable {
    codes: &'static [u32],
    lens: &'static [u8],
    wrap: u16,
}

/// Tables indexed by `table_select`, except for tables 16 to 31 which share two codebooks and
/// differ only in their linbits.
const HUFFMAN_TABLES: [HuffmanTable; 18] = [
    HuffmanTable { codes: &[], lens: &[], wrap: 0 },
    HuffmanTable { codes: &HUFFMAN_CODES_1, lens: &HUFFMAN_LENS_1, wrap: 2 },
    HuffmanTable { codes: &HUFFMAN_CODES_2, lens: &HUFFMAN_LENS_2, wrap: 3 },
    HuffmanTable { codes: &HUFFMAN_CODES_3, lens: &HUFFMAN_LENS_3, wrap: 3 },
    // Table 4 is not used.
    HuffmanTable { codes: &[], lens: &[], wrap: 0 },
    HuffmanTable { codes: &HUFFMAN_CODES_5, lens: &HUFFMAN_LENS_5, wrap: 4 },
    HuffmanTable { codes: &HUFFMAN_CODES_6, lens: &HUFFMAN_LENS_6, wrap: 4 },
    HuffmanTable { codes: &HUFFMAN_CODES_7, lens: &HUFFMAN_LENS_7, wrap: 6 },
    HuffmanTable { codes: &HUFFMAN_CODES_8, lens: &HUFFMAN_LENS_8, wrap: 6 },
    HuffmanTable { codes: &HUFFMAN_CODES_9, lens: &HUFFMAN_LENS_9, wrap: 6 },
    HuffmanTable { codes: &HUFFMAN_CODES_10, lens: &HUFFMAN_LENS_10, wrap: 8 },
    HuffmanTable { codes: &HUFFMAN_CODES_11, lens: &HUFFMAN_LENS_11, wrap: 8 },
    HuffmanTable { codes: &HUFFMAN_CODES_12, lens: &HUFFMAN_LENS_12, wrap: 8 },
    HuffmanTable { codes: &HUFFMAN_CODES_13, lens: &HUFFMAN_LENS_13, wrap: 16 },
    // Table 14 is not used.
    HuffmanTable { codes: &[], lens: &[], wrap: 0 },
    HuffmanTable { codes: &HUFFMAN_CODES_15, lens: &HUFFMAN_LENS_15, wrap: 16 },
    // Tables 16 to 23.
    HuffmanTable { codes: &HUFFMAN_CODES_16, lens: &HUFFMAN_LENS_16, wrap: 16 },
    // Tables 24 to 31.
    HuffmanTable { codes: &HUFFMAN_CODES_24, lens: &HUFFMAN_LENS_24, wrap: 16 },
];

/// The number of extra bits read for a saturated value (15), indexed by `table_select`.
pub const LINBITS: [u32; 32] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 6, 8, 10, 13, 4, 5, 6, 7, 8, 9, 11,
    13,
];

/// Build a codebook whose values pack the row in the upper and the column in the lower nibble.
fn build(codes: &[u32], lens: &[u8], wrap: u16) -> Codebook<u16> {
    let values: Vec<u16> =
        (0..codes.len() as u16).map(|i| ((i / wrap) << 4) | (i % wrap)).collect();

    Codebook::new(codes, lens, &values)
}

lazy_static! {
    /// Big values codebooks.
    pub static ref CODEBOOKS: Vec<Codebook<u16>> = HUFFMAN_TABLES
        .iter()
        .map(|table| build(table.codes, table.lens, table.wrap.max(1)))
        .collect();

    /// Count1 codebooks, tables A and B. Each value holds 4 one-bit samples, `v` in the most
    /// significant bit.
    pub static ref QUADS_CODEBOOKS: [Codebook<u16>; 2] = [
        build(&QUADS_CODES_A, &QUADS_LENS_A, 16),
        build(&QUADS_CODES_B, &QUADS_LENS_B, 16),
    ];
}

/// Gets the big values codebook for a `table_select` value.
#[inline(always)]
pub fn codebook(table_select: u8) -> &'static Codebook<u16> {
    let idx = match table_select {
        0..=15 => usize::from(table_select),
        16..=23 => 16,
        _ => 17,
    };

    &CODEBOOKS[idx]
}
