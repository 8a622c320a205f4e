// src/noyau/nombre.rs
//
// Nombre exact : significande décimal en précision arbitraire.
// - chiffres : base 10, poids fort en tête ; valeur = 0.d1d2…dn × 10^exposant
// - zéro canonique : {[0], exposant 1, positif}
// - add / sub / mul exacts (algorithmes d'école sur les vecteurs de chiffres)
// - division et conversion rationnelle via entiers scalés (BigInt)
// - tronque(p, haut) : arrondi dirigé, vers +∞ si haut, vers −∞ sinon
//
// Invariants après normalisation : pas de zéro de tête ni de queue dans le
// significande (sauf pour le zéro canonique), vecteur jamais vide.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::erreurs::Erreur;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NombreExact {
    pub(crate) chiffres: Vec<u8>,
    pub(crate) exposant: i64,
    pub(crate) positif: bool,
}

impl NombreExact {
    pub fn zero() -> Self {
        Self {
            chiffres: vec![0],
            exposant: 1,
            positif: true,
        }
    }

    pub fn un() -> Self {
        Self {
            chiffres: vec![1],
            exposant: 1,
            positif: true,
        }
    }

    pub fn moins_un() -> Self {
        Self {
            chiffres: vec![1],
            exposant: 1,
            positif: false,
        }
    }

    /// Construit puis normalise. Les chiffres doivent être en base 10.
    pub(crate) fn nouveau(chiffres: Vec<u8>, exposant: i64, positif: bool) -> Self {
        let mut n = Self {
            chiffres,
            exposant,
            positif,
        };
        n.normalise();
        n
    }

    /// 1 ulp à la position `position` (1-indexée depuis le chiffre de tête)
    /// d'un nombre d'exposant `exposant`.
    pub(crate) fn ulp(exposant: i64, position: usize) -> Self {
        Self {
            chiffres: vec![1],
            exposant: exposant - position as i64 + 1,
            positif: true,
        }
    }

    pub fn est_nul(&self) -> bool {
        self.chiffres.len() == 1 && self.chiffres[0] == 0
    }

    pub fn strictement_positif(&self) -> bool {
        self.positif && !self.est_nul()
    }

    pub fn strictement_negatif(&self) -> bool {
        !self.positif && !self.est_nul()
    }

    /// Signe porté par la représentation (le zéro canonique est positif).
    pub fn signe_positif(&self) -> bool {
        self.positif
    }

    pub fn exposant(&self) -> i64 {
        self.exposant
    }

    pub fn chiffres(&self) -> &[u8] {
        &self.chiffres
    }

    /// Vrai si la valeur n'a aucune partie fractionnaire.
    pub fn est_entier(&self) -> bool {
        self.est_nul() || self.exposant >= self.chiffres.len() as i64
    }

    pub fn abs(&self) -> Self {
        let mut r = self.clone();
        r.positif = true;
        r
    }

    fn normalise(&mut self) {
        let mut debut = 0;
        while debut < self.chiffres.len() && self.chiffres[debut] == 0 {
            debut += 1;
        }
        if debut == self.chiffres.len() {
            *self = Self::zero();
            return;
        }
        if debut > 0 {
            self.chiffres.drain(..debut);
            self.exposant -= debut as i64;
        }
        while self.chiffres.len() > 1 && self.chiffres.last() == Some(&0) {
            self.chiffres.pop();
        }
    }

    /// Addition exacte, signes compris.
    pub fn ajoute(&self, autre: &Self) -> Self {
        if self.est_nul() {
            return autre.clone();
        }
        if autre.est_nul() {
            return self.clone();
        }
        if self.positif == autre.positif {
            let mut r = ajoute_grandeurs(self, autre);
            r.positif = self.positif;
            return r;
        }
        match compare_grandeurs(self, autre) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                let mut r = soustrait_grandeurs(self, autre);
                r.positif = self.positif;
                r
            }
            Ordering::Less => {
                let mut r = soustrait_grandeurs(autre, self);
                r.positif = autre.positif;
                r
            }
        }
    }

    /// Multiplication exacte, produit d'école en O(n·m).
    pub fn multiplie(&self, autre: &Self) -> Self {
        if self.est_nul() || autre.est_nul() {
            return Self::zero();
        }
        let na = self.chiffres.len();
        let nb = autre.chiffres.len();
        let mut acc = vec![0u32; na + nb];
        for (i, &da) in self.chiffres.iter().enumerate() {
            for (j, &db) in autre.chiffres.iter().enumerate() {
                acc[i + j + 1] += u32::from(da) * u32::from(db);
            }
        }
        for k in (1..na + nb).rev() {
            let v = acc[k];
            acc[k - 1] += v / 10;
            acc[k] = v % 10;
        }
        let chiffres: Vec<u8> = acc.iter().map(|&v| v as u8).collect();
        Self::nouveau(
            chiffres,
            self.exposant + autre.exposant,
            self.positif == autre.positif,
        )
    }

    /// Troncature dirigée à `precision` chiffres de significande.
    /// Exacte dès que le significande tient déjà dans `precision` chiffres.
    pub fn tronque(&self, precision: usize, arrondi_haut: bool) -> Self {
        let p = precision.max(1);
        if self.chiffres.len() <= p {
            return self.clone();
        }
        let mut chiffres: Vec<u8> = self.chiffres[..p].to_vec();
        let reste_non_nul = self.chiffres[p..].iter().any(|&c| c != 0);
        let mut exposant = self.exposant;
        // tronquer la grandeur rapproche de zéro : on ne rajoute un ulp que
        // si la direction demandée s'éloigne de zéro pour ce signe
        if reste_non_nul && arrondi_haut == self.positif && incremente_dernier(&mut chiffres) {
            chiffres.insert(0, 1);
            exposant += 1;
        }
        Self::nouveau(chiffres, exposant, self.positif)
    }

    /// Quotient dirigé à `precision` chiffres de significande.
    /// Échoue seulement sur un diviseur nul.
    pub fn divise(
        &self,
        diviseur: &Self,
        precision: usize,
        arrondi_haut: bool,
    ) -> Result<Self, Erreur> {
        if diviseur.est_nul() {
            return Err(Erreur::DivisionDivergente);
        }
        if self.est_nul() {
            return Ok(Self::zero());
        }
        let q = self.vers_rationnel() / diviseur.vers_rationnel();
        Ok(Self::depuis_rationnel(
            q.numer(),
            q.denom(),
            precision,
            arrondi_haut,
        ))
    }

    /// Conversion dirigée d'un rationnel num/den (den non nul) vers un nombre
    /// exact à `precision` chiffres de significande. Division longue par
    /// entiers scalés : floor(|num| · 10^garde / |den|), puis troncature et
    /// correction d'arrondi dans la direction demandée.
    pub fn depuis_rationnel(
        num: &BigInt,
        den: &BigInt,
        precision: usize,
        arrondi_haut: bool,
    ) -> Self {
        if num.is_zero() || den.is_zero() {
            return Self::zero();
        }
        let p = precision.max(1);
        let positif = num.is_negative() == den.is_negative();
        let n = num.abs();
        let d = den.abs();

        let garde = p + d.to_string().len() + 2;
        let echelle = BigInt::from(10).pow(garde as u32);
        let produit = &n * &echelle;
        let scalaire = &produit / &d;
        let reste_division = &produit % &d;

        let texte = scalaire.to_str_radix(10);
        let tous: Vec<u8> = texte.bytes().map(|b| b - b'0').collect();
        let mut exposant = texte.len() as i64 - garde as i64;

        let mut chiffres: Vec<u8> = tous[..p].to_vec();
        let reste_non_nul =
            !reste_division.is_zero() || tous[p..].iter().any(|&c| c != 0);
        if reste_non_nul && arrondi_haut == positif && incremente_dernier(&mut chiffres) {
            chiffres.insert(0, 1);
            exposant += 1;
        }
        Self::nouveau(chiffres, exposant, positif)
    }

    /// Valeur exacte en rationnel.
    pub fn vers_rationnel(&self) -> BigRational {
        if self.est_nul() {
            return BigRational::zero();
        }
        let mut n = BigInt::zero();
        for &c in &self.chiffres {
            n = n * BigInt::from(10) + BigInt::from(c);
        }
        if !self.positif {
            n = -n;
        }
        let decalage = self.exposant - self.chiffres.len() as i64;
        if decalage >= 0 {
            BigRational::from_integer(n * BigInt::from(10).pow(decalage as u32))
        } else {
            BigRational::new(n, BigInt::from(10).pow((-decalage) as u32))
        }
    }

    /// Valeur entière positive, si le nombre en est une.
    pub(crate) fn vers_entier_positif(&self) -> Option<BigUint> {
        if self.est_nul() {
            return Some(BigUint::zero());
        }
        if !self.positif || !self.est_entier() {
            return None;
        }
        let mut n = BigUint::zero();
        for &c in &self.chiffres {
            n = n * BigUint::from(10u32) + BigUint::from(c);
        }
        let zeros = (self.exposant - self.chiffres.len() as i64) as u32;
        Some(n * BigUint::from(10u32).pow(zeros))
    }

    /// Puissance entière exacte par exponentiation rapide.
    pub fn puissance_entiere(&self, exposant: &BigUint) -> Self {
        let mut e = exposant.clone();
        let mut acc = Self::un();
        let mut b = self.clone();
        while !e.is_zero() {
            if e.bit(0) {
                acc = &acc * &b;
            }
            e >>= 1u32;
            if !e.is_zero() {
                b = &b * &b;
            }
        }
        acc
    }
}

/* ------------------------ Grandeurs (sans signe) ------------------------ */

/// Aligne le significande sur l'exposant `exp` (>= exposant du nombre) en
/// préfixant des zéros.
fn chiffres_alignes(n: &NombreExact, exp: i64) -> Vec<u8> {
    let mut v = vec![0u8; (exp - n.exposant) as usize];
    v.extend_from_slice(&n.chiffres);
    v
}

fn compare_grandeurs(a: &NombreExact, b: &NombreExact) -> Ordering {
    match a.exposant.cmp(&b.exposant) {
        Ordering::Equal => {
            let n = a.chiffres.len().max(b.chiffres.len());
            for i in 0..n {
                let da = a.chiffres.get(i).copied().unwrap_or(0);
                let db = b.chiffres.get(i).copied().unwrap_or(0);
                match da.cmp(&db) {
                    Ordering::Equal => {}
                    autre => return autre,
                }
            }
            Ordering::Equal
        }
        autre => autre,
    }
}

fn ajoute_grandeurs(a: &NombreExact, b: &NombreExact) -> NombreExact {
    let exp = a.exposant.max(b.exposant);
    let ca = chiffres_alignes(a, exp);
    let cb = chiffres_alignes(b, exp);
    let n = ca.len().max(cb.len());
    let mut out = vec![0u8; n];
    let mut retenue = 0u8;
    for i in (0..n).rev() {
        let s = ca.get(i).copied().unwrap_or(0) + cb.get(i).copied().unwrap_or(0) + retenue;
        out[i] = s % 10;
        retenue = s / 10;
    }
    let mut exposant = exp;
    if retenue > 0 {
        out.insert(0, retenue);
        exposant += 1;
    }
    NombreExact::nouveau(out, exposant, true)
}

/// Suppose |a| >= |b|.
fn soustrait_grandeurs(a: &NombreExact, b: &NombreExact) -> NombreExact {
    let exp = a.exposant.max(b.exposant);
    let ca = chiffres_alignes(a, exp);
    let cb = chiffres_alignes(b, exp);
    let n = ca.len().max(cb.len());
    let mut out = vec![0u8; n];
    let mut emprunt = 0i16;
    for i in (0..n).rev() {
        let mut v = i16::from(ca.get(i).copied().unwrap_or(0))
            - i16::from(cb.get(i).copied().unwrap_or(0))
            - emprunt;
        if v < 0 {
            v += 10;
            emprunt = 1;
        } else {
            emprunt = 0;
        }
        out[i] = v as u8;
    }
    NombreExact::nouveau(out, exp, true)
}

/// Incrémente le dernier chiffre avec propagation de retenue.
/// Retourne vrai si la retenue déborde du premier chiffre.
fn incremente_dernier(chiffres: &mut [u8]) -> bool {
    for c in chiffres.iter_mut().rev() {
        if *c == 9 {
            *c = 0;
        } else {
            *c += 1;
            return false;
        }
    }
    true
}

/* ------------------------ Ordre total et opérateurs ------------------------ */

impl Ord for NombreExact {
    fn cmp(&self, autre: &Self) -> Ordering {
        match (self.est_nul(), autre.est_nul()) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if autre.positif {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, true) => {
                if self.positif {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, false) => match (self.positif, autre.positif) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (true, true) => compare_grandeurs(self, autre),
                (false, false) => compare_grandeurs(autre, self),
            },
        }
    }
}

impl PartialOrd for NombreExact {
    fn partial_cmp(&self, autre: &Self) -> Option<Ordering> {
        Some(self.cmp(autre))
    }
}

impl Neg for &NombreExact {
    type Output = NombreExact;
    fn neg(self) -> NombreExact {
        if self.est_nul() {
            return NombreExact::zero();
        }
        let mut r = self.clone();
        r.positif = !r.positif;
        r
    }
}

impl Add for &NombreExact {
    type Output = NombreExact;
    fn add(self, autre: Self) -> NombreExact {
        self.ajoute(autre)
    }
}

impl Sub for &NombreExact {
    type Output = NombreExact;
    fn sub(self, autre: Self) -> NombreExact {
        self.ajoute(&-autre)
    }
}

impl Mul for &NombreExact {
    type Output = NombreExact;
    fn mul(self, autre: Self) -> NombreExact {
        self.multiplie(autre)
    }
}

/* ------------------------ Affichage décimal ------------------------ */

impl fmt::Display for NombreExact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_nul() {
            return write!(f, "0");
        }
        let signe = if self.positif { "" } else { "-" };
        let n = self.chiffres.len() as i64;
        let texte: String = self.chiffres.iter().map(|&c| char::from(c + b'0')).collect();
        if self.exposant <= 0 {
            let zeros = "0".repeat((-self.exposant) as usize);
            write!(f, "{signe}0.{zeros}{texte}")
        } else if self.exposant >= n {
            let zeros = "0".repeat((self.exposant - n) as usize);
            write!(f, "{signe}{texte}{zeros}")
        } else {
            let (ent, frac) = texte.split_at(self.exposant as usize);
            write!(f, "{signe}{ent}.{frac}")
        }
    }
}
