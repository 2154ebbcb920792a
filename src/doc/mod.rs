/*!
Additional documentation.

# Components

These tables summarise the provided string components.  Prefixes are used in type aliases and debug output.

## Encodings

See the `encoding` module.

| Prefix  | Name    | Unit  | Encoding |
| ------- | ------- | ----- | -------- |
| `Utf8`  | `Utf8`  | `u8`  | UTF-8.  Validated strictly by default; see `Continuation`. |
| `Utf16` | `Utf16` | `u16` | UTF-16 in native byte order.  Unpaired surrogates are rejected. |
| `Utf32` | `Utf32` | `u32` | One codepoint per unit.  Surrogates and values above `0x10FFFF` are rejected. |

## Allocators

See the `alloc` module.

| Prefix | Allocator |
| ------ | --------- |
| `C`    | C runtime heap allocator (*i.e.* `malloc`/`free`), used when no allocator is given. |
| `A`    | A caller-supplied `AllocPair`. |

# Errors

Errors have stable negative codes, used verbatim by the C interface.

| Code  | Error |
| ----: | ----- |
| `-1`  | `NullPointer` |
| `-2`  | `InvalidUtf8Character` |
| `-3`  | `InvalidUtf16Character` |
| `-4`  | `StringEndedInCharacter` |
| `-5`  | `InvalidCodepoint` |
| `-6`  | `SurrogatePairInversion` |
| `-7`  | `InvalidAllocator` |
| `-8`  | `NullAllocator` |
| `-9`  | `BadAllocation` |
| `-10` | `Overflow` |
| `-11` | `InvalidParameter` |
| `-12` | `BufferTooSmall` |

# Conversion Variants

Each C entry point name is the direction followed by a suffix made of these letters.

| Letter | Meaning |
| ------ | ------- |
| `n`    | The source has an explicit length; scanning also stops at a terminator. |
| `m`    | The result is written into a caller buffer of a given capacity. |
| `l`    | A caller buffer is used as the intermediate codepoint array. |
| `a`    | An explicit allocator is used. |

In Rust, `Options::transcode_into` corresponds to `m`, `Options::transcode` to `a`, and `Options::with_scratch` to `l`.

# Common Misconceptions and Mistakes

* *"A capacity of `n` means `n` units of memory."*  It means `n` units of text, plus one for the terminator.  A zero-length buffer cannot even hold an empty string.

* *"The count is the number of bytes."*  Counting yields codepoints; measuring yields units of the target encoding.  Neither includes the terminator.

* *"Any pair of functions will do for an allocator."*  The free function must release exactly what the allocation function returned, and the returned memory must be aligned for the unit type.  Buffers must be released by the allocator that produced them.

* *"A failed conversion leaves nothing to clean up."*  That is true of this crate: on failure, any buffer allocated during the call has already been released, and output pointers are null.
*/
