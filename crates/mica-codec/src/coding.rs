use super::error::Result;
use std::io::{Read, Write};

pub trait Decoder: Sized {
    fn decode<R: Read>(reader: &mut R) -> Result<Self>;
}

pub trait Encoder {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<usize>;
}

macro_rules! impl_int {
    ($($t:ty),*) => {
        $(
            impl Decoder for $t {
                fn decode<R: Read>(reader: &mut R) -> Result<Self> {
                    let mut data = [0; std::mem::size_of::<$t>()];
                    reader.read_exact(&mut data)?;
                    Ok(<$t>::from_be_bytes(data))
                }
            }

            impl Encoder for $t {
                fn encode<W: Write>(&self, writer: &mut W) -> Result<usize> {
                    writer.write_all(&self.to_be_bytes())?;
                    Ok(std::mem::size_of::<$t>())
                }
            }
        )*
    };
}

impl_int!(i8, i16, i32);
impl_int!(u8, u16, u32);

#[test]
fn signed_byte_reads_twos_complement() {
    let mut buffer: &[u8] = &[0xFF, 0x08];
    assert_eq!(i8::decode(&mut buffer).unwrap(), -1);
    assert_eq!(i8::decode(&mut buffer).unwrap(), 8);
    assert!(i8::decode(&mut buffer).is_err());
}

#[test]
fn ints_are_big_endian() {
    let mut buffer = Vec::new();
    assert_eq!(0x0102u16.encode(&mut buffer).unwrap(), 2);
    assert_eq!(buffer, [0x01, 0x02]);

    let decoded = u16::decode(&mut buffer.as_slice()).unwrap();
    assert_eq!(decoded, 0x0102);
}
