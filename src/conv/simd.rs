//! SIMD micro-kernels with NEON acceleration and scalar fallbacks.

// ── FP32 AXPY: c[c_off..] += a_val * b[b_off..] ──

#[cfg(all(target_arch = "aarch64", feature = "simd"))]
pub fn axpy_f32(c: &mut [f32], c_off: usize, b: &[f32], b_off: usize, a_val: f32, len: usize) {
    use core::arch::aarch64::*;
    let c = &mut c[c_off..c_off + len];
    let b = &b[b_off..b_off + len];
    let mut j = 0usize;
    unsafe {
        let a_vec = vdupq_n_f32(a_val);
        while j + 4 <= len {
            let b_vec = vld1q_f32(b.as_ptr().add(j));
            let c_vec = vld1q_f32(c.as_ptr().add(j));
            let r = vfmaq_f32(c_vec, a_vec, b_vec);
            vst1q_f32(c.as_mut_ptr().add(j), r);
            j += 4;
        }
    }
    // scalar tail
    while j < len {
        c[j] += a_val * b[j];
        j += 1;
    }
}

#[cfg(not(all(target_arch = "aarch64", feature = "simd")))]
pub fn axpy_f32(c: &mut [f32], c_off: usize, b: &[f32], b_off: usize, a_val: f32, len: usize) {
    let c = &mut c[c_off..c_off + len];
    let b = &b[b_off..b_off + len];
    for (cv, bv) in c.iter_mut().zip(b) {
        *cv += a_val * bv;
    }
}

// ── FP32 dot product: sum(a[a_off..] * b[b_off..]) ──

#[cfg(all(target_arch = "aarch64", feature = "simd"))]
pub fn dot_f32(a: &[f32], a_off: usize, b: &[f32], b_off: usize, len: usize) -> f32 {
    use core::arch::aarch64::*;
    let a = &a[a_off..a_off + len];
    let b = &b[b_off..b_off + len];
    let mut j = 0usize;
    let mut sum = unsafe {
        let mut acc = vdupq_n_f32(0.0);
        while j + 4 <= len {
            let va = vld1q_f32(a.as_ptr().add(j));
            let vb = vld1q_f32(b.as_ptr().add(j));
            acc = vfmaq_f32(acc, va, vb);
            j += 4;
        }
        vaddvq_f32(acc)
    };
    while j < len {
        sum += a[j] * b[j];
        j += 1;
    }
    sum
}

#[cfg(not(all(target_arch = "aarch64", feature = "simd")))]
pub fn dot_f32(a: &[f32], a_off: usize, b: &[f32], b_off: usize, len: usize) -> f32 {
    a[a_off..a_off + len]
        .iter()
        .zip(&b[b_off..b_off + len])
        .map(|(x, y)| x * y)
        .sum()
}
