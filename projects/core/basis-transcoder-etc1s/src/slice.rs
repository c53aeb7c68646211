//! # ETC1S Slice Decoding
//!
//! A slice is the entropy coded block grid of one image level. Blocks are
//! visited row-major; each one resolves an endpoint palette index and a
//! selector palette index.
//!
//! ## Endpoints
//!
//! Every 2x2 group of blocks shares one prediction symbol holding four 2-bit
//! predictors. The symbol is read on even rows; its upper half is stashed for
//! the odd row below. A special symbol repeats the previous prediction symbol
//! for a VLC coded number of groups.
//!
//! | Predictor | Endpoint index                                           |
//! |-----------|----------------------------------------------------------|
//! | 0         | left neighbour                                           |
//! | 1         | upper neighbour                                          |
//! | 2         | upper-left neighbour, or previous frame for video slices |
//! | 3         | Huffman coded delta from the previous block, modulo count |
//!
//! ## Selectors
//!
//! Selector symbols are either direct palette indices, references into a
//! small history buffer kept in approximate move-to-front order, or a run
//! symbol that repeats the most recent history entry.

use crate::{
    endpoint::{Endpoint, EndpointPalette},
    error::Etc1sError,
    read_symbol,
    selector::{Selector, SelectorPalette},
    tables::Etc1sTables,
};
use alloc::vec;
use alloc::vec::Vec;
use basis_transcoder_common::BitReader;
use likely_stable::unlikely;

/// Prediction symbol that repeats the previous one.
pub const ENDPOINT_PRED_REPEAT_LAST_SYMBOL: u32 = 256;
/// Size of the endpoint prediction alphabet.
pub const ENDPOINT_PRED_TOTAL_SYMBOLS: u32 = 257;
const ENDPOINT_PRED_MIN_REPEAT_COUNT: u32 = 3;
const ENDPOINT_PRED_COUNT_VLC_BITS: u32 = 4;

/// Shortest selector run.
pub const SELECTOR_HISTORY_BUF_RLE_COUNT_THRESH: u32 = 3;
/// Size of the run length alphabet. The last symbol escapes to a VLC.
pub const SELECTOR_HISTORY_BUF_RLE_COUNT_TOTAL: u32 = 64;
const SELECTOR_HISTORY_BUF_RLE_COUNT_VLC_BITS: u32 = 7;

/// Approximate move-to-front list of recently used selector indices.
///
/// New values are written at a rover that cycles through the upper half of
/// the list; a used entry is swapped halfway towards the front.
#[derive(Debug, Clone)]
pub struct ApproxMoveToFront {
    values: Vec<u32>,
    rover: usize,
}

impl ApproxMoveToFront {
    /// Creates a list of `size` zero entries.
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0; size],
            rover: size / 2,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the list has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Inserts `value` at the rover.
    pub fn add(&mut self, value: u32) {
        if self.values.is_empty() {
            return;
        }
        self.values[self.rover] = value;
        self.rover += 1;
        if self.rover == self.values.len() {
            self.rover = self.values.len() / 2;
        }
    }

    /// Promotes entry `index` halfway towards the front.
    pub fn use_index(&mut self, index: usize) {
        if index < self.values.len() {
            self.values.swap(index / 2, index);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BlockPred {
    endpoint_index: u32,
    pred_bits: u32,
}

/// Block grid of one slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceGrid {
    /// Blocks per row.
    pub num_blocks_x: u32,
    /// Block rows.
    pub num_blocks_y: u32,
}

impl SliceGrid {
    /// Blocks in the slice.
    #[inline]
    pub fn total_blocks(&self) -> u32 {
        self.num_blocks_x * self.num_blocks_y
    }
}

/// Decodes one slice, calling `sink(x, y, endpoint, selector)` for every block in row-major order.
///
/// `prev_frame` holds one packed `endpoint | selector << 16` entry per block
/// and marks the slice as a video frame: predictor 2 then reuses the entry of
/// the same block, and every decoded block overwrites its entry. It must hold
/// at least `grid.total_blocks()` entries.
///
/// # Errors
///
/// Returns an [`Etc1sError`] for any prediction, index or run that falls
/// outside the slice or the palettes. Blocks before the failing one may
/// already have been passed to `sink`.
pub fn decode_slice<F>(
    bytes: &[u8],
    grid: SliceGrid,
    endpoints: &EndpointPalette,
    selectors: &SelectorPalette,
    tables: &Etc1sTables,
    mut prev_frame: Option<&mut [u32]>,
    mut sink: F,
) -> Result<(), Etc1sError>
where
    F: FnMut(u32, u32, &Endpoint, &Selector),
{
    let num_endpoints = endpoints.len() as u32;
    let num_selectors = selectors.len() as u32;
    let total_blocks = grid.total_blocks();
    let nbx = grid.num_blocks_x as usize;

    if let Some(prev) = prev_frame.as_deref() {
        if unlikely(prev.len() < total_blocks as usize) {
            return Err(Etc1sError::IndexOutOfRange {
                index: total_blocks,
                limit: prev.len() as u32,
            });
        }
    }

    let mut reader = BitReader::new(bytes);
    let mut history = ApproxMoveToFront::new(tables.selector_history_buf_size as usize);
    let history_first_symbol = num_selectors;
    let history_rle_symbol = num_selectors + tables.selector_history_buf_size;

    let mut preds = [vec![BlockPred::default(); nbx], vec![BlockPred::default(); nbx]];
    let mut cur_selector_rle_count = 0u32;
    let mut cur_pred_bits = 0u32;
    let mut prev_endpoint_pred_sym = 0u32;
    let mut endpoint_pred_repeat_count = 0u32;
    let mut prev_endpoint_index = 0u32;

    for y in 0..grid.num_blocks_y {
        let cur = (y & 1) as usize;

        for x in 0..grid.num_blocks_x {
            let xi = x as usize;
            let block_index = (y * grid.num_blocks_x + x) as usize;

            if x & 1 == 0 {
                if y & 1 == 0 {
                    if endpoint_pred_repeat_count > 0 {
                        endpoint_pred_repeat_count -= 1;
                        cur_pred_bits = prev_endpoint_pred_sym;
                    } else {
                        cur_pred_bits = read_symbol(&mut reader, &tables.endpoint_pred_model)?;
                        if cur_pred_bits == ENDPOINT_PRED_REPEAT_LAST_SYMBOL {
                            endpoint_pred_repeat_count = reader
                                .decode_vlc(ENDPOINT_PRED_COUNT_VLC_BITS)
                                .saturating_add(ENDPOINT_PRED_MIN_REPEAT_COUNT - 1);
                            cur_pred_bits = prev_endpoint_pred_sym;
                        } else if unlikely(cur_pred_bits > ENDPOINT_PRED_REPEAT_LAST_SYMBOL) {
                            return Err(Etc1sError::IndexOutOfRange {
                                index: cur_pred_bits,
                                limit: ENDPOINT_PRED_TOTAL_SYMBOLS,
                            });
                        } else {
                            prev_endpoint_pred_sym = cur_pred_bits;
                        }
                    }
                    preds[cur ^ 1][xi].pred_bits = cur_pred_bits >> 4;
                } else {
                    cur_pred_bits = preds[cur][xi].pred_bits;
                }
            }

            let pred = cur_pred_bits & 3;
            cur_pred_bits >>= 2;

            let mut selector_from_prev_frame = None;
            let endpoint_index = match pred {
                0 => {
                    if unlikely(x == 0) {
                        return Err(Etc1sError::InvalidPrediction { x, y });
                    }
                    prev_endpoint_index
                }
                1 => {
                    if unlikely(y == 0) {
                        return Err(Etc1sError::InvalidPrediction { x, y });
                    }
                    preds[cur ^ 1][xi].endpoint_index
                }
                2 => match prev_frame.as_deref() {
                    Some(prev) => {
                        let packed = prev[block_index];
                        selector_from_prev_frame = Some(packed >> 16);
                        packed & 0xFFFF
                    }
                    None => {
                        if unlikely(x == 0 || y == 0) {
                            return Err(Etc1sError::InvalidPrediction { x, y });
                        }
                        preds[cur ^ 1][xi - 1].endpoint_index
                    }
                },
                _ => {
                    let delta = read_symbol(&mut reader, &tables.delta_endpoint_model)?;
                    let mut index = delta + prev_endpoint_index;
                    if index >= num_endpoints {
                        index = index.wrapping_sub(num_endpoints);
                    }
                    index
                }
            };

            preds[cur][xi].endpoint_index = endpoint_index;
            prev_endpoint_index = endpoint_index;

            let selector_index = match selector_from_prev_frame {
                Some(index) => index,
                None if cur_selector_rle_count > 0 => {
                    cur_selector_rle_count -= 1;
                    history_entry(&history, 0)?
                }
                None => {
                    let symbol = read_symbol(&mut reader, &tables.selector_model)?;
                    if symbol == history_rle_symbol {
                        let run_symbol =
                            read_symbol(&mut reader, &tables.selector_history_buf_rle_model)?;
                        let run = if run_symbol == SELECTOR_HISTORY_BUF_RLE_COUNT_TOTAL - 1 {
                            reader
                                .decode_vlc(SELECTOR_HISTORY_BUF_RLE_COUNT_VLC_BITS)
                                .saturating_add(SELECTOR_HISTORY_BUF_RLE_COUNT_THRESH)
                        } else {
                            run_symbol + SELECTOR_HISTORY_BUF_RLE_COUNT_THRESH
                        };
                        if unlikely(run > total_blocks) {
                            return Err(Etc1sError::RunTooLong {
                                run,
                                total: total_blocks,
                            });
                        }
                        cur_selector_rle_count = run - 1;
                        history_entry(&history, 0)?
                    } else if symbol >= history_first_symbol {
                        let index = (symbol - history_first_symbol) as usize;
                        let value = history_entry(&history, index)?;
                        if index != 0 {
                            history.use_index(index);
                        }
                        value
                    } else {
                        history.add(symbol);
                        symbol
                    }
                }
            };

            let endpoint = endpoints.get(endpoint_index).ok_or(Etc1sError::IndexOutOfRange {
                index: endpoint_index,
                limit: num_endpoints,
            })?;
            let selector = selectors.get(selector_index).ok_or(Etc1sError::IndexOutOfRange {
                index: selector_index,
                limit: num_selectors,
            })?;

            if let Some(prev) = prev_frame.as_deref_mut() {
                prev[block_index] = endpoint_index | (selector_index << 16);
            }

            sink(x, y, endpoint, selector);
        }
    }

    Ok(())
}

#[inline]
fn history_entry(history: &ApproxMoveToFront, index: usize) -> Result<u32, Etc1sError> {
    history.get(index).ok_or(Etc1sError::IndexOutOfRange {
        index: index as u32,
        limit: history.len() as u32,
    })
}
