//! CPF validation and normalization.
//!
//! A CPF is an 11-digit Brazilian identifier whose last two digits are
//! check digits computed by weighted modular sums over the preceding ones.

/// Strips every non-digit character, keeping only the numbers.
pub fn normalizar_cpf(cpf: &str) -> String {
    cpf.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validates a CPF. Accepts punctuated or bare input.
pub fn validar_cpf(cpf: &str) -> bool {
    let limpo = normalizar_cpf(cpf);

    if limpo.len() != 11 {
        return false;
    }

    let digitos: Vec<u32> = limpo.chars().filter_map(|c| c.to_digit(10)).collect();

    // Sequences of a single repeated digit (e.g. 111.111.111-11) pass the
    // checksum but are not valid CPFs.
    if digitos.iter().all(|&d| d == digitos[0]) {
        return false;
    }

    // First check digit: weights 10..2 over digits 0-8
    let soma: u32 = digitos[..9]
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (10 - i as u32))
        .sum();
    let mut resto = (soma * 10) % 11;
    if resto == 10 || resto == 11 {
        resto = 0;
    }
    if resto != digitos[9] {
        return false;
    }

    // Second check digit: weights 11..2 over digits 0-9
    let soma: u32 = digitos[..10]
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (11 - i as u32))
        .sum();
    let mut resto = (soma * 10) % 11;
    if resto == 10 || resto == 11 {
        resto = 0;
    }

    resto == digitos[10]
}
