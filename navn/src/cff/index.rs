//! Writing CFF INDEX structures.
//!
//! They are read with `Index1` from `read-fonts`.

use super::CffError;

/// Appends an INDEX holding `items` to `out`, using the smallest offset size
/// that fits.
pub(crate) fn write_index<T: AsRef<[u8]>>(items: &[T], out: &mut Vec<u8>) -> Result<(), CffError> {
    let count = u16::try_from(items.len()).map_err(|_| CffError::IndexOverflow)?;
    out.extend(count.to_be_bytes());
    if count == 0 {
        return Ok(());
    }
    let last_offset = items.iter().map(|item| item.as_ref().len()).sum::<usize>() + 1;
    let off_size = match last_offset {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        0x100_0000..=0xFFFF_FFFF => 4,
        _ => return Err(CffError::IndexOverflow),
    };
    out.push(off_size as u8);
    let mut offset = 1u32;
    let push_offset = |out: &mut Vec<u8>, offset: u32| {
        out.extend_from_slice(&offset.to_be_bytes()[4 - off_size..]);
    };
    push_offset(out, offset);
    for item in items {
        offset += item.as_ref().len() as u32;
        push_offset(out, offset);
    }
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use write_fonts::read::{tables::postscript::Index1, FontData, FontRead};

    #[test]
    fn empty_index() {
        let mut out = Vec::new();
        write_index::<&[u8]>(&[], &mut out).unwrap();
        assert_eq!(out, [0, 0]);
        // an empty INDEX is followed by the next structure
        write_index(&[[1u8]], &mut out).unwrap();
        let index = Index1::read(FontData::new(&out)).unwrap();
        assert_eq!(index.count(), 0);
        assert_eq!(index.size_in_bytes().unwrap(), 2);
    }

    #[test]
    fn small_index() {
        let mut out = vec![0xAA];
        write_index(&[b"ab".as_slice(), b"".as_slice(), b"cde".as_slice()], &mut out).unwrap();
        assert_eq!(out, [0xAA, 0, 3, 1, 1, 3, 3, 6, b'a', b'b', b'c', b'd', b'e']);
        let index = Index1::read(FontData::new(&out[1..])).unwrap();
        assert_eq!(index.count(), 3);
        assert_eq!(index.get(0).unwrap(), b"ab");
        assert_eq!(index.get(1).unwrap(), b"");
        assert_eq!(index.get(2).unwrap(), b"cde");
        assert_eq!(index.size_in_bytes().unwrap(), out.len() - 1);
    }

    #[test]
    fn two_byte_offsets() {
        let big = vec![7u8; 300];
        let mut out = Vec::new();
        write_index(&[&big], &mut out).unwrap();
        assert_eq!(&out[..7], &[0, 1, 2, 0, 1, 0x01, 0x2D]);
        let index = Index1::read(FontData::new(&out)).unwrap();
        assert_eq!(index.off_size(), 2);
        assert_eq!(index.get(0).unwrap(), big.as_slice());
        assert_eq!(index.size_in_bytes().unwrap(), out.len());
    }

    #[test]
    fn too_many_items() {
        let items = vec![[0u8]; u16::MAX as usize + 1];
        assert!(matches!(
            write_index(&items, &mut Vec::new()),
            Err(CffError::IndexOverflow)
        ));
    }
}
