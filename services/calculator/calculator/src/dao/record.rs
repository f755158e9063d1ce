//! One calculation per line, written as `<expression>;<result>`

use calculator_client::Calculation;

use crate::dao::DaoError;

const SEPARATOR: char = ';';

pub(crate) fn encode(calculation: &Calculation) -> Result<String, DaoError> {
    let expression = calculation.expression.as_str();
    if expression.contains(SEPARATOR) || expression.contains('\n') {
        return Err(DaoError::InvalidRecord(format!(
            "expression \"{}\" contains a reserved character",
            expression.escape_default()
        )));
    }

    // Display for f64 is the shortest representation that parses back exactly
    Ok(format!("{}{}{}", expression, SEPARATOR, calculation.result))
}

pub(crate) fn decode(line: &str) -> Result<Calculation, DaoError> {
    let (expression, result) = line
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| DaoError::Corrupt(line.to_string()))?;

    let result = result
        .parse::<f64>()
        .map_err(|_| DaoError::Corrupt(line.to_string()))?;

    Ok(Calculation::new(expression, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() -> Result<(), DaoError> {
        assert_eq!(encode(&Calculation::new("7 / 2", 3.5))?, "7 / 2;3.5");
        assert_eq!(encode(&Calculation::new("2 + 2", 4.0))?, "2 + 2;4");
        assert_eq!(encode(&Calculation::new("-1", -1.0))?, "-1;-1");
        Ok(())
    }

    #[test]
    fn test_decode() -> Result<(), DaoError> {
        assert_eq!(decode("7 / 2;3.5")?, Calculation::new("7 / 2", 3.5));
        // Records written with fixed precision still decode
        assert_eq!(decode("2 + 2;4.000000")?, Calculation::new("2 + 2", 4.0));
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), DaoError> {
        for result in [0.1 + 0.2, -4.0, 1e-7, 1e300, f64::MIN_POSITIVE, -0.0].iter() {
            let calculation = Calculation::new("(1 + 2) * 3", *result);
            let decoded = decode(&encode(&calculation)?)?;
            assert_eq!(decoded, calculation);
        }
        Ok(())
    }

    #[test]
    fn test_reserved_characters() {
        assert!(matches!(
            encode(&Calculation::new("1;2", 1.0)),
            Err(DaoError::InvalidRecord(_))
        ));
        assert!(matches!(
            encode(&Calculation::new("1\n2", 1.0)),
            Err(DaoError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_corrupt() {
        assert!(matches!(decode("no separator"), Err(DaoError::Corrupt(_))));
        assert!(matches!(decode("1 + 1;two"), Err(DaoError::Corrupt(_))));
        assert!(matches!(decode(""), Err(DaoError::Corrupt(_))));
    }
}
