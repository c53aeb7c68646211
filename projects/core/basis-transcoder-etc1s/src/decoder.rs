//! # ETC1S Decoder
//!
//! Holds the palettes and tables shared by all slices of one file, decoded
//! once per transcoding session.

use crate::{
    block::Etc1sBlock,
    codebook::GlobalSelectorCodebook,
    endpoint::EndpointPalette,
    error::Etc1sError,
    selector::SelectorPalette,
    slice::{decode_slice, SliceGrid},
    tables::Etc1sTables,
};
use tracing::debug;

/// Raw file sections an [`Etc1sDecoder`] is built from.
#[derive(Debug, Clone, Copy)]
pub struct Etc1sSections<'a> {
    /// Endpoint palette section.
    pub endpoint_data: &'a [u8],
    /// Number of palette endpoints.
    pub num_endpoints: u32,
    /// Selector palette section.
    pub selector_data: &'a [u8],
    /// Number of palette selectors.
    pub num_selectors: u32,
    /// Tables section.
    pub table_data: &'a [u8],
}

/// Decoded palettes and tables of one ETC1S file.
#[derive(Debug, Clone)]
pub struct Etc1sDecoder {
    endpoints: EndpointPalette,
    selectors: SelectorPalette,
    tables: Etc1sTables,
}

impl Etc1sDecoder {
    /// Decodes the shared sections of a file.
    ///
    /// # Errors
    ///
    /// Returns an [`Etc1sError`] if any section is malformed or a selector
    /// references a missing codebook entry.
    pub fn new(
        sections: Etc1sSections,
        codebook: &GlobalSelectorCodebook,
    ) -> Result<Self, Etc1sError> {
        if sections.num_endpoints == 0 {
            return Err(Etc1sError::InvalidPalette("file declares no endpoints"));
        }
        if sections.num_selectors == 0 {
            return Err(Etc1sError::InvalidPalette("file declares no selectors"));
        }

        let endpoints = EndpointPalette::decode(sections.endpoint_data, sections.num_endpoints)?;
        let selectors =
            SelectorPalette::decode(sections.selector_data, sections.num_selectors, codebook)?;
        let tables = Etc1sTables::decode(sections.table_data)?;

        debug!(
            num_endpoints = sections.num_endpoints,
            num_selectors = sections.num_selectors,
            history = tables.selector_history_buf_size,
            "Decoded ETC1S palettes"
        );

        Ok(Self {
            endpoints,
            selectors,
            tables,
        })
    }

    /// Endpoint palette.
    pub fn endpoints(&self) -> &EndpointPalette {
        &self.endpoints
    }

    /// Selector palette.
    pub fn selectors(&self) -> &SelectorPalette {
        &self.selectors
    }

    /// Shared tables.
    pub fn tables(&self) -> &Etc1sTables {
        &self.tables
    }

    /// Decodes one slice, passing each block to `sink(x, y, block)` in row-major order.
    ///
    /// See [`decode_slice`] for the meaning of `prev_frame`.
    pub fn decode_slice<F>(
        &self,
        bytes: &[u8],
        grid: SliceGrid,
        prev_frame: Option<&mut [u32]>,
        mut sink: F,
    ) -> Result<(), Etc1sError>
    where
        F: FnMut(u32, u32, &Etc1sBlock),
    {
        decode_slice(
            bytes,
            grid,
            &self.endpoints,
            &self.selectors,
            &self.tables,
            prev_frame,
            |x, y, endpoint, selector| sink(x, y, &Etc1sBlock::new(*endpoint, *selector)),
        )
    }
}
