use ark_ff::FftField;
use bnplonk_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// Field polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpPolynomial<F> {
    /// Coefficients of the polynomial, low-order coefficient first.
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the polynomial coefs reference.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial
    /// # Example
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One};
    /// let poly = FpPolynomial::<BN254Scalar>::zero();
    /// let zero = BN254Scalar::zero();
    /// assert_eq!(poly.degree(), 0);
    /// assert_eq!(poly.eval(&zero), zero);
    /// assert_eq!(poly.eval(&BN254Scalar::one()), zero);
    /// ```
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficient are trimmed.
    /// # Example
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let five = two.add(&two).add(&one);
    /// let poly = FpPolynomial::from_coefs(vec![one, zero, one]);
    /// assert_eq!(poly.degree(), 2);
    /// assert_eq!(poly.eval(&zero), one);
    /// assert_eq!(poly.eval(&one), two);
    /// assert_eq!(poly.eval(&two), five);
    /// let poly2 = FpPolynomial::from_coefs(vec![one, zero, one, zero, zero, zero]);
    /// assert_eq!(poly2.degree(), 2);
    /// assert_eq!(poly, poly2);
    /// ```
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Return a polynomial of `degree` + 1 uniformly random coefficients.
    pub fn random<R: CryptoRng + RngCore>(prng: &mut R, degree: usize) -> FpPolynomial<F> {
        let mut coefs = Vec::with_capacity(degree + 1);
        for _ in 0..degree + 1 {
            coefs.push(F::random(prng));
        }
        Self::from_coefs(coefs)
    }

    /// Remove high degree zero-coefficients
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().map_or(false, |c| c.is_zero()) {
            self.coefs.pop();
        }
    }

    /// Return degree of the polynomial
    /// # Example:
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One};
    /// let poly = FpPolynomial::<BN254Scalar>::from_coefs(vec![BN254Scalar::one(); 10]);
    /// assert_eq!(poly.degree(), 9);
    /// let poly = FpPolynomial::<BN254Scalar>::from_coefs(vec![BN254Scalar::zero(); 10]);
    /// assert_eq!(poly.degree(), 0)
    /// ```
    pub fn degree(&self) -> usize {
        if self.coefs.is_empty() {
            0
        } else {
            self.coefs.len() - 1
        }
    }

    /// Test if polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefs.iter().all(|c| c.is_zero())
    }

    /// Evaluate a polynomial on a point.
    pub fn eval(&self, point: &F) -> F {
        let mut result = F::zero();
        for coef in self.coefs.iter().rev() {
            result.mul_assign(point);
            result.add_assign(coef);
        }
        result
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.add_assign(other_coef);
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.extend_from_slice(&other.coefs[n..]);
        }
        self.trim_coefs();
    }

    /// Add with another polynomial, producing a new polynomial.
    /// # Example:
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let three = two.add(&one);
    /// let poly1 = FpPolynomial::from_coefs(vec![zero, one, two, three]);
    /// let poly2 = FpPolynomial::from_coefs(vec![three, two, one, zero, one]);
    /// let poly_add = poly1.add(&poly2);
    /// assert_eq!(poly_add, poly2.add(&poly1));
    /// let poly_expected = FpPolynomial::from_coefs(vec![three, three, three, three, one]);
    /// assert_eq!(poly_add, poly_expected);
    /// ```
    pub fn add(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.add_assign(other);
        new
    }

    /// Subtracts another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.sub_assign(other_coef);
        }
        let n = self.coefs.len();
        if other.coefs.len() > n {
            for other_coef in other.coefs[n..].iter() {
                self.coefs.push(other_coef.neg());
            }
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial from self, producing a new polynomial.
    /// # Example:
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let three = two.add(&one);
    /// let poly1 = FpPolynomial::from_coefs(vec![three, three, two]);
    /// let poly2 = FpPolynomial::from_coefs(vec![three, two, one, one]);
    /// let poly_sub = poly1.sub(&poly2);
    /// let poly_expected = FpPolynomial::from_coefs(vec![zero, one, one, one.neg()]);
    /// assert_eq!(poly_sub, poly_expected);
    /// ```
    pub fn sub(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.sub_assign(other);
        new
    }

    /// Negate the coefficients.
    pub fn neg(&self) -> Self {
        self.mul_scalar(&F::one().neg())
    }

    /// Multiply polynomial by a constant scalar.
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            coef.mul_assign(scalar)
        }
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar into a new polynomial.
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_scalar_assign(scalar);
        new
    }

    /// Multiply the polynomial variable by a scalar.
    /// mul_var(\sum a_i X^i, b) = \sum a_i b^i X^i
    /// # Example:
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// let four = two.add(&two);
    /// let poly = FpPolynomial::from_coefs(vec![zero, one, one]);
    /// let result = poly.mul_var(&two);
    /// assert_eq!(result, FpPolynomial::from_coefs(vec![zero, two, four]));
    /// ```
    pub fn mul_var(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        let mut r = F::one();
        for coef in new.coefs.iter_mut() {
            coef.mul_assign(&r);
            r.mul_assign(scalar);
        }
        new.trim_coefs();
        new
    }

    /// Multiply two polynomials.
    /// # Example:
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One, ops::*};
    /// let one = BN254Scalar::one();
    /// let two = one.add(&one);
    /// // (1 + X) * (1 + X) = 1 + 2X + X^2
    /// let poly = FpPolynomial::from_coefs(vec![one, one]);
    /// assert_eq!(poly.mul(&poly), FpPolynomial::from_coefs(vec![one, two, one]));
    /// ```
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut coefs = vec![F::zero(); self.coefs.len() + other.coefs.len() - 1];
        for (i, a) in self.coefs.iter().enumerate() {
            for (j, b) in other.coefs.iter().enumerate() {
                coefs[i + j].add_assign(&a.mul(b));
            }
        }
        Self::from_coefs(coefs)
    }

    /// Divide polynomial to produce the quotient and remainder polynomials.
    /// Return `None` when the divisor is the zero polynomial.
    /// # Example:
    /// ```
    /// use bnplonk::poly_commit::field_polynomial::FpPolynomial;
    /// use bnplonk_algebra::bn254::BN254Scalar;
    /// use bnplonk_algebra::{Zero, One, ops::*};
    /// let zero = BN254Scalar::zero();
    /// let one = BN254Scalar::one();
    /// let poly = FpPolynomial::from_coefs(vec![one, one, one]);
    /// let divisor = FpPolynomial::from_coefs(vec![one, one]);
    /// let (q, r) = poly.div_rem(&divisor).unwrap();
    /// assert_eq!(q, FpPolynomial::from_coefs(vec![zero, one]));
    /// assert_eq!(r, FpPolynomial::from_coefs(vec![one]));
    /// assert!(poly.div_rem(&FpPolynomial::zero()).is_none());
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }
        let k = self.coefs.len();
        let l = divisor.coefs.len();
        if l > k {
            return Some((Self::zero(), self.clone()));
        }
        let divisor_coefs = &divisor.coefs[..];
        let bl_inv = divisor_coefs[l - 1].inv().ok()?;
        let mut rem = self.coefs.clone();
        let mut quo = vec![F::zero(); k - l + 1];
        for i in (0..(k - l + 1)).rev() {
            let qi = bl_inv.mul(&rem[i + l - 1]);
            for (j, d) in divisor_coefs.iter().enumerate() {
                rem[i + j].sub_assign(&qi.mul(d));
            }
            quo[i] = qi;
        }
        rem.truncate(l - 1);
        if rem.is_empty() {
            rem.push(F::zero());
        }
        Some((FpPolynomial::from_coefs(quo), FpPolynomial::from_coefs(rem)))
    }

    /// Compute the polynomial given its evaluation values at the `len`
    /// `len`-th roots of unity, given a primitive `len`-th root of unity.
    pub fn ffti(root: &F, values: &[F], len: usize) -> Option<Self> {
        if !len.is_power_of_two() || values.len() > len {
            return None;
        }
        let zero = F::zero();
        let mut values: Vec<&F> = values.iter().collect();
        values.resize(len, &zero);

        let coefs = recursive_ifft(&values, root)?;
        Some(Self::from_coefs(coefs))
    }
}

/// given the coefs of a polynomial and a primitive n-th root of unity for field, compute its FFT
/// n is a power of two
fn recursive_fft<F: Scalar>(coefs: &[&F], root: &F) -> Vec<F> {
    let n = coefs.len();
    if n == 1 {
        return vec![*coefs[0]];
    }
    let root_sq = root.mul(root);
    let even: Vec<&F> = coefs.iter().step_by(2).copied().collect();
    let odd: Vec<&F> = coefs.iter().skip(1).step_by(2).copied().collect();

    let y_even = recursive_fft(&even, &root_sq);
    let y_odd = recursive_fft(&odd, &root_sq);

    let mut omega = F::one();
    let mut fft = vec![F::zero(); n];
    for (i, (e, o)) in y_even.iter().zip(y_odd.iter()).enumerate() {
        let omega_o = omega.mul(o);
        fft[i] = e.add(&omega_o);
        fft[n / 2 + i] = e.sub(&omega_o);
        omega.mul_assign(root);
    }
    fft
}

/// given the the values of a polynomial at the n n-th root of unity,
/// and a primitive n-th root of unity if computes its coefficients.
fn recursive_ifft<F: Scalar>(values: &[&F], root: &F) -> Option<Vec<F>> {
    let n = values.len();
    let root_inv = root.pow(&[(n - 1) as u64]);
    let n_inv = F::from(n as u64).inv().ok()?;
    Some(
        recursive_fft(values, &root_inv)
            .into_iter()
            .map(|x| n_inv.mul(&x))
            .collect(),
    )
}

/// Return a primitive `num_points`-th root of unity, if `num_points` is a
/// power of two within the two-adicity of the field.
pub fn primitive_nth_root_of_unity<F: Domain>(num_points: usize) -> Option<F> {
    if !num_points.is_power_of_two() {
        return None;
    }
    <F::Field as FftField>::get_root_of_unity(num_points as u64).map(F::from_field)
}
