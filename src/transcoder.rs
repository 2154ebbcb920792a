/*!
Options and the six conversion directions.

Every conversion is one parameterised operation: a bounded source, either a caller buffer or a freshly allocated one for the result, an optional scratch codepoint buffer, and an optional allocator.  `Options` carries everything but the source and destination.

```
# #[cfg(feature = "default-alloc")] {
use utfz::{Options, Utf16, Utf8};

let utf16 = Options::new().transcode::<Utf8, Utf16>("gªrçon".as_bytes()).unwrap();
assert_eq!(&utf16[..], &[0x67, 0xAA, 0x72, 0xE7, 0x6F, 0x6E][..]);
# }
```
*/
use tracing::debug;

use crate::alloc::{AllocPair, Allocator};
use crate::encoding::conv::{self, Config, Transcode};
use crate::encoding::{Encoding, TranscodeTo, Utf16, Utf32, Utf8};
use crate::error::Error;
use crate::sea::ZString;
use crate::structure::ZeroTerm;

/**
Settings shared by all conversions.

The default is `Config::default()`, the process-wide default allocator, and no scratch buffer.
*/
#[derive(Debug, Default)]
pub struct Options<'a> {
    config: Config,
    alloc: Option<AllocPair>,
    scratch: Option<&'a mut [u32]>,
}

impl<'a> Options<'a> {
    pub fn new() -> Self {
        Options::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /**
    Use `pair` for every allocation instead of the process-wide default.
    */
    pub fn with_allocator(mut self, pair: AllocPair) -> Self {
        self.alloc = Some(pair);
        self
    }

    /**
    Use `scratch` as the intermediate codepoint buffer when converting directly between UTF-8 and UTF-16, rather than allocating one.

    As with any destination, one slot is reserved for the terminator.  If the source holds more codepoints than that, the conversion fails with `Error::BufferTooSmall`.
    */
    pub fn with_scratch(mut self, scratch: &'a mut [u32]) -> Self {
        self.scratch = Some(scratch);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /**
    Resolve the allocator these options will allocate with.
    */
    pub fn allocator(&self) -> Result<Allocator, Error> {
        Allocator::resolve(self.alloc.as_ref())
    }

    /**
    Convert `src` into a newly allocated string.
    */
    pub fn transcode<S, D>(&mut self, src: &[S::Unit]) -> Result<ZString<D>, Error>
    where
        S: TranscodeTo<D>,
        D: Encoding,
    {
        S::transcode(src, self)
    }

    /**
    Convert `src` into `dst`.  Returns the number of units written, excluding the terminator.
    */
    pub fn transcode_into<S, D>(&mut self, src: &[S::Unit], dst: &mut [D::Unit]) -> Result<usize, Error>
    where
        S: TranscodeTo<D>,
        D: Encoding,
    {
        S::transcode_into(src, dst, self)
    }

    /**
    Convert a zero-terminated foreign string into a newly allocated string.

    # Safety

    If non-null, `src` must point to a readable, zero-terminated sequence of units.
    */
    pub unsafe fn transcode_ptr<S, D>(&mut self, src: *const S::Unit) -> Result<ZString<D>, Error>
    where
        S: TranscodeTo<D>,
        D: Encoding,
    {
        let src = ZeroTerm::slice_units(src, self.config.max_count)?;
        S::transcode(src, self)
    }

    /**
    Count the codepoints in a UTF-8 or UTF-16 string.
    */
    pub fn count<E>(&self, src: &[E::Unit]) -> Result<usize, Error> where E: Transcode {
        conv::count::<E>(src, &self.config)
    }

    /**
    Compute how many `E` units the codepoints in `cps` encode to.
    */
    pub fn measure<E>(&self, cps: &[u32]) -> Result<usize, Error> where E: Transcode {
        conv::measure::<E>(cps, &self.config)
    }
}

fn decode_alloc<S>(src: &[S::Unit], cfg: &Config, alloc: Allocator) -> Result<ZString<Utf32>, Error>
where
    S: Transcode,
{
    let count = conv::count::<S>(src, cfg)?;
    if count == cfg.max_count {
        return Err(Error::Overflow);
    }

    // On failure the buffer is dropped, which frees it.
    let mut cps = ZString::<Utf32>::with_capacity(count, alloc)?;
    let written = conv::decode_into::<S>(src, cps.buffer_mut(), cfg)?;
    cps.set_len(written);
    Ok(cps)
}

fn encode_alloc<D>(cps: &[u32], cfg: &Config, alloc: Allocator) -> Result<ZString<D>, Error>
where
    D: Transcode,
{
    let size = conv::measure::<D>(cps, cfg)?;
    if size == cfg.max_count {
        return Err(Error::Overflow);
    }

    let mut out = ZString::<D>::with_capacity(size, alloc)?;
    let written = conv::encode_into::<D>(cps, out.buffer_mut(), cfg)?;
    out.set_len(written);
    Ok(out)
}

/**
Decode `src` into whichever intermediate buffer `opts` calls for, then hand the codepoints to `encode`.

The intermediate buffer, if allocated here, is freed before returning, whatever the outcome.
*/
fn via_codepoints<S, T, F>(src: &[S::Unit], opts: &mut Options, encode: F) -> Result<T, Error>
where
    S: Transcode,
    F: FnOnce(&[u32], &Config, &Options) -> Result<T, Error>,
{
    let cfg = opts.config;

    if let Some(scratch) = opts.scratch.take() {
        let result = conv::decode_into::<S>(src, scratch, &cfg)
            .and_then(|count| encode(&scratch[..count], &cfg, opts));
        opts.scratch = Some(scratch);
        return result;
    }

    let alloc = opts.allocator()?;
    let cps = decode_alloc::<S>(src, &cfg, alloc)?;
    let result = encode(&cps, &cfg, opts);
    if let Err(err) = &result {
        debug!(%err, "encoding pass failed; releasing intermediate codepoints");
    }
    result
}

macro_rules! decode_impl {
    ($src:ty) => {
        impl TranscodeTo<Utf32> for $src {
            fn transcode_into(src: &[Self::Unit], dst: &mut [u32], opts: &mut Options) -> Result<usize, Error> {
                conv::decode_into::<$src>(src, dst, &opts.config)
            }

            fn transcode(src: &[Self::Unit], opts: &mut Options) -> Result<ZString<Utf32>, Error> {
                let alloc = opts.allocator()?;
                decode_alloc::<$src>(src, &opts.config, alloc)
            }
        }
    };
}

macro_rules! encode_impl {
    ($dst:ty) => {
        impl TranscodeTo<$dst> for Utf32 {
            fn transcode_into(src: &[u32], dst: &mut [<$dst as Encoding>::Unit], opts: &mut Options) -> Result<usize, Error> {
                conv::encode_into::<$dst>(src, dst, &opts.config)
            }

            fn transcode(src: &[u32], opts: &mut Options) -> Result<ZString<$dst>, Error> {
                let alloc = opts.allocator()?;
                encode_alloc::<$dst>(src, &opts.config, alloc)
            }
        }
    };
}

macro_rules! composite_impl {
    ($src:ty => $dst:ty) => {
        impl TranscodeTo<$dst> for $src {
            fn transcode_into(src: &[Self::Unit], dst: &mut [<$dst as Encoding>::Unit], opts: &mut Options) -> Result<usize, Error> {
                via_codepoints::<$src, _, _>(src, opts, |cps, cfg, _| {
                    conv::encode_into::<$dst>(cps, dst, cfg)
                })
            }

            fn transcode(src: &[Self::Unit], opts: &mut Options) -> Result<ZString<$dst>, Error> {
                via_codepoints::<$src, _, _>(src, opts, |cps, cfg, opts| {
                    encode_alloc::<$dst>(cps, cfg, opts.allocator()?)
                })
            }
        }
    };
}

decode_impl! { Utf8 }
decode_impl! { Utf16 }
encode_impl! { Utf8 }
encode_impl! { Utf16 }
composite_impl! { Utf8 => Utf16 }
composite_impl! { Utf16 => Utf8 }
