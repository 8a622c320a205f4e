// src/noyau/transcendant.rs
//
// Noyaux transcendants : exp, log, sin/cos tronqués à la précision demandée
// avec arrondi dirigé. Chaque noyau calcule une somme partielle EXACTE en
// rationnels, une borne de queue rigoureuse, puis convertit la borne
// valeur ± queue en décimal dans la direction demandée. L'encadrement est
// donc garanti quel que soit le nombre de termes sommés.
//
// Séries :
// - exp : Maclaurin, queue <= 2·terme suivant dès que 2|x| <= k+1
// - log : ln(y) = 2·atanh((y−1)/(y+1)) après réduction binaire de y
//         vers [2/3, 4/3], plus k·ln(2) par la même série en 1/3
// - sin/cos : Maclaurin entrelacées sur |x|, même borne de queue que exp

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreurs::Erreur;
use super::nombre::NombreExact;

/// Tolérance absolue visée par les sommes partielles : 10^-(p+4).
fn tolerance(precision: usize) -> BigRational {
    BigRational::new(BigInt::one(), BigInt::from(10).pow(precision as u32 + 4))
}

/// Convertit valeur ± queue en décimal dirigé à `precision` chiffres.
fn borne_dirigee(
    valeur: &BigRational,
    queue: &BigRational,
    precision: usize,
    arrondi_haut: bool,
) -> NombreExact {
    let encadre = if arrondi_haut {
        valeur + queue
    } else {
        valeur - queue
    };
    NombreExact::depuis_rationnel(encadre.numer(), encadre.denom(), precision, arrondi_haut)
}

/* ------------------------ Exponentielle ------------------------ */

pub(crate) fn exp_tronque(x: &NombreExact, precision: usize, arrondi_haut: bool) -> NombreExact {
    let r = x.vers_rationnel();
    let negatif = r.is_negative();
    let a = r.abs();
    let (somme, queue) = serie_exp(&a, precision);
    if !negatif {
        return borne_dirigee(&somme, &queue, precision, arrondi_haut);
    }
    // exp(−a) = 1 / exp(a) : inversion exacte de l'encadrement (exp(a) >= 1)
    let borne = if arrondi_haut {
        BigRational::one() / (&somme - &queue)
    } else {
        BigRational::one() / (&somme + &queue)
    };
    NombreExact::depuis_rationnel(borne.numer(), borne.denom(), precision, arrondi_haut)
}

/// Somme partielle de exp(a), a >= 0, et borne de queue.
fn serie_exp(a: &BigRational, precision: usize) -> (BigRational, BigRational) {
    let tol = tolerance(precision);
    let deux = BigRational::from_integer(BigInt::from(2));
    let a_double = a * &deux;
    let mut somme = BigRational::one();
    let mut terme = BigRational::one();
    let mut k: u32 = 0;
    loop {
        k += 1;
        terme = &terme * a / BigRational::from_integer(BigInt::from(k));
        somme = &somme + &terme;
        let prochain = &terme * a / BigRational::from_integer(BigInt::from(k + 1));
        // rapport des termes <= 1/2 : la queue est majorée par 2·prochain
        if a_double <= BigRational::from_integer(BigInt::from(k + 1)) && prochain < tol {
            return (somme, prochain * deux);
        }
    }
}

/* ------------------------ Logarithme ------------------------ */

pub(crate) fn log_tronque(
    x: &NombreExact,
    precision: usize,
    arrondi_haut: bool,
) -> Result<NombreExact, Erreur> {
    let r = x.vers_rationnel();
    if !r.is_positive() {
        return Err(Erreur::LogarithmeHorsDomaine);
    }

    // réduction binaire : y = r / 2^k dans [2/3, 4/3]
    let deux = BigRational::from_integer(BigInt::from(2));
    let borne_basse = BigRational::new(BigInt::from(2), BigInt::from(3));
    let borne_haute = BigRational::new(BigInt::from(4), BigInt::from(3));
    let mut y = r;
    let mut k: i64 = 0;
    while y > borne_haute {
        y = y / &deux;
        k += 1;
    }
    while y < borne_basse {
        y = y * &deux;
        k -= 1;
    }

    let un = BigRational::one();
    let z = (&y - &un) / (&y + &un);
    // la marge de précision couvre le facteur k de la contribution de ln(2)
    let (somme_y, queue_y) = serie_atanh(&z, precision + 20);
    let tiers = BigRational::new(BigInt::one(), BigInt::from(3));
    let (somme_2, queue_2) = serie_atanh(&tiers, precision + 20);

    let kr = BigRational::from_integer(BigInt::from(k));
    let somme = (&somme_y + &kr * &somme_2) * &deux;
    let queue = (&queue_y + kr.abs() * &queue_2) * &deux;
    Ok(borne_dirigee(&somme, &queue, precision, arrondi_haut))
}

/// Somme partielle de atanh(z), |z| <= 1/3, et borne de queue.
fn serie_atanh(z: &BigRational, precision: usize) -> (BigRational, BigRational) {
    let tol = tolerance(precision);
    let z_carre = z * z;
    let mut puissance = z.clone();
    let mut somme = z.clone();
    let mut m: u32 = 1;
    loop {
        puissance = &puissance * &z_carre;
        m += 2;
        somme = &somme + &(&puissance / BigRational::from_integer(BigInt::from(m)));
        let prochaine =
            (&puissance * &z_carre).abs() / BigRational::from_integer(BigInt::from(m + 2));
        if prochaine < tol {
            // queue géométrique : facteur 1/(1−z²) <= 9/8 pour |z| <= 1/3
            let queue = prochaine * BigRational::new(BigInt::from(9), BigInt::from(8));
            return (somme, queue);
        }
    }
}

/* ------------------------ Sinus et cosinus ------------------------ */

/// Les deux valeurs sont tronquées dans la même direction, comme attendu
/// par la propagation qui les demande par extrémité d'intervalle.
pub(crate) fn sin_cos(
    x: &NombreExact,
    precision: usize,
    arrondi_haut: bool,
) -> (NombreExact, NombreExact) {
    let r = x.vers_rationnel();
    let (mut somme_sin, somme_cos, queue) = series_sin_cos(&r.abs(), precision);
    if r.is_negative() {
        somme_sin = -somme_sin;
    }
    (
        borne_dirigee(&somme_sin, &queue, precision, arrondi_haut),
        borne_dirigee(&somme_cos, &queue, precision, arrondi_haut),
    )
}

/// Sommes partielles entrelacées de sin(a) et cos(a), a >= 0, et borne de
/// queue commune aux deux séries.
fn series_sin_cos(a: &BigRational, precision: usize) -> (BigRational, BigRational, BigRational) {
    let tol = tolerance(precision);
    let deux = BigRational::from_integer(BigInt::from(2));
    let a_double = a * &deux;
    let mut terme = BigRational::one(); // a^m / m!
    let mut somme_sin = BigRational::zero();
    let mut somme_cos = BigRational::one();
    let mut m: u32 = 0;
    loop {
        m += 1;
        terme = &terme * a / BigRational::from_integer(BigInt::from(m));
        let positif = (m / 2) % 2 == 0;
        let contribution = if positif {
            terme.clone()
        } else {
            -terme.clone()
        };
        if m % 2 == 1 {
            somme_sin = &somme_sin + &contribution;
        } else {
            somme_cos = &somme_cos + &contribution;
        }
        let prochain = &terme * a / BigRational::from_integer(BigInt::from(m + 1));
        if a_double <= BigRational::from_integer(BigInt::from(m + 1)) && prochain < tol {
            return (somme_sin, somme_cos, prochain * deux);
        }
    }
}
