// 32-bit FNV-1a
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Maps an identifier to a deterministic, roughly uniform value in [0, 1]
pub fn stable_unit_hash(value: &str) -> f64 {
    hash32(value) as f64 / u32::MAX as f64
}

pub fn hash32(value: &str) -> u32 {
    value.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
    })
}
