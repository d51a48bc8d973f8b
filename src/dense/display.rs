use core::fmt;

use num_complex::Complex;

use super::{DenseComplexMatrix, DenseMatrix, SplitComplexArray};

/// Bracketed rows, one per line, entries printed with three decimals
/// unless the formatter asks for another precision.
fn write_rows<E>(
    f: &mut fmt::Formatter<'_>,
    nrows: usize,
    ncols: usize,
    mut entry: E,
) -> fmt::Result
where
    E: FnMut(&mut fmt::Formatter<'_>, usize, usize, usize) -> fmt::Result,
{
    let precision = f.precision().unwrap_or(3);
    writeln!(f, "[")?;
    for i in 0..nrows {
        write!(f, "  [")?;
        for j in 0..ncols {
            if j > 0 {
                write!(f, ",  ")?;
            }
            entry(f, i, j, precision)?;
        }
        write!(f, "]")?;
        if i + 1 < nrows {
            write!(f, ",")?;
        }
        writeln!(f)?;
    }
    write!(f, "]")
}

fn write_complex(f: &mut fmt::Formatter<'_>, z: Complex<f64>, precision: usize) -> fmt::Result {
    if z.im < 0.0 {
        write!(f, "{:.*} - {:.*}i", precision, z.re, precision, -z.im)
    } else {
        write!(f, "{:.*} + {:.*}i", precision, z.re, precision, z.im)
    }
}

impl<T: fmt::Display> fmt::Display for DenseMatrix<T> {
    /// ```
    /// use eigenspan::DenseMatrix;
    /// let m = DenseMatrix::from_vec(2, 2, vec![1.0, 0.5, -2.0, 4.0]).unwrap();
    /// assert_eq!(m.to_string(), "[\n  [1.000,  0.500],\n  [-2.000,  4.000]\n]");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.nrows, self.ncols, |f, i, j, p| {
            write!(f, "{:.*}", p, self[(i, j)])
        })
    }
}

impl fmt::Display for DenseComplexMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.nrows(), self.ncols(), |f, i, j, p| {
            write_complex(f, self.get(i, j), p)
        })
    }
}

impl fmt::Display for SplitComplexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        write!(f, "[ ")?;
        for (k, z) in self.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write_complex(f, z, precision)?;
        }
        write!(f, " ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn complex_matrix_display() {
        let m = DenseComplexMatrix::new(
            vec![Complex::new(1.0, -0.5), Complex::new(0.0, 2.0)]
                .into_iter()
                .collect(),
            1,
            2,
        )
        .unwrap();
        assert_eq!(m.to_string(), "[\n  [1.000 - 0.500i,  0.000 + 2.000i]\n]");
    }

    #[test]
    fn split_array_display_precision() {
        let z = SplitComplexArray::from_real(vec![1.0, 2.0]);
        assert_eq!(alloc::format!("{:.1}", z), "[ 1.0 + 0.0i, 2.0 + 0.0i ]");
    }

    #[test]
    fn integer_matrix_display() {
        let m = DenseMatrix::from_vec(1, 2, vec![3, 4]).unwrap();
        assert_eq!(m.to_string(), "[\n  [3,  4]\n]");
    }
}
