//! Wire Text Grammar
//!
//! This module documents the delimited text form produced and consumed by
//! this library.
//!
//! # Overview
//!
//! A packed message is one line of text: a list of elements separated by a
//! configurable delimiter. Each element addresses one parameter of a
//! registered set and optionally carries a value.
//!
//! ```text
//! list      := element (DELIM element)*
//! element   := [prefix '.'] name ['%' field] ['(' child-id ')'] ['[' tag ']'] ['=' value]
//! value     := scalar | '0x'hex | bool-name | enum-name | array-enc | tuple-enc | '{' list '}'
//! array-enc := 8hexdigits (word-hex)*        -- word width from the element type
//! tuple-enc := key ':' value | key '/' value -- '/' for the string/uint8 tuple kind
//! ```
//!
//! The delimiter (default `,`), the assignment separator (default `=`),
//! and the escape character (default `\`) are configurable via
//! [`PackOptions`](crate::PackOptions); both peers must use the same
//! configuration.
//!
//! # Identifiers
//!
//! | part | meaning |
//! |------|---------|
//! | `prefix.` | the owning set's registered prefix; optional when the receiver is given a set-id hint |
//! | `name` | the parameter's name, matched exactly against the set's descriptor table |
//! | `%field` | addresses one field slot of a composite ("bag") parameter |
//! | `(child-id)` | addresses a declared child of the resolved field's parameter |
//! | `[tag]` | `1..=99`, the Nth occurrence of a repeatable parameter; absent means untagged |
//!
//! Inside a bag's braces every member is identified by its field name
//! alone; the `prefix.`, outer `name`, and `%` never appear there.
//!
//! # Values
//!
//! | declared kind | wire form | examples |
//! |---------------|-----------|----------|
//! | signed integers | decimal | `=-42` |
//! | unsigned integers, address | `0x` + lowercase hex | `=0xa` |
//! | enums | symbolic name when the table knows the value, else numeric | `=fast`, `=9` |
//! | booleans | `true` / `false` | `=true` |
//! | strings | escaped free text | `=hello\, world` |
//! | word arrays | 8-hex-digit word count, then fixed-width hex words | `=0000000200ab1234` |
//! | tuples | `key:value` (`key/value` for string/uint8) | `=k:v`, `=lvl/7` |
//! | bags | braces around a recursively packed member list | `={rate=0x3,mode=slow}` |
//!
//! An element with no `=value` part is the "get" query form: identity
//! only.
//!
//! # Escaping
//!
//! Free-form text (string values, tuple keys and string tuple values)
//! escapes the active delimiter, the brace pair, the escape character
//! itself, and — in tuple keys — the tuple separator. A character preceded
//! by an odd number of escape characters is inert; an even run means the
//! escapes cancelled each other and the character is live. Brace nesting
//! is tracked independently of delimiter splitting, so a brace-quoted bag
//! value stays atomic no matter what it contains.
//!
//! # Unpacking strictness
//!
//! - numeric text must be fully consumed; `10q` is an error, not `10`
//! - unsigned kinds auto-detect a `0x`/`0X` prefix; signed kinds are
//!   decimal only
//! - declared min/max bounds are enforced, never clamped
//! - a configured range table must contain the value; the matched entry's
//!   id is reported to the caller
//! - an array body must hold exactly as many words as its length header
//!   declares
//!
//! # Examples
//!
//! ```text
//! radio.volume=0x2f
//! radio.station[3]=fm
//! radio.preset%slot=0x1,radio.preset%label=jazz
//! audio.mixer={gain=-4,mute=false}
//! ```

// This module contains only documentation; no implementation code
