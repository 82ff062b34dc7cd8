//! Display Content
//!
//! Closed enumerations for the card vocabulary (arcana, suit, orientation,
//! spread slot, spread narrative) together with their Portuguese labels and
//! icons. Every lookup is a `match` with one explicit fallback arm, so a value
//! the backend invents still renders as something sensible.

// ============================================================================
// UI Text
// ============================================================================

/// Fixed UI strings
pub mod text {
    /// Placeholder when the meaning for the drawn orientation is missing
    pub const MEANING_UNAVAILABLE: &str = "Significado não disponível";
    /// Placeholder for a search preview with no meaning at all
    pub const MEANING_PENDING: &str = "Significado em processamento...";
    /// Placeholder for a missing meaning in the card-detail view
    pub const NOT_AVAILABLE: &str = "Não disponível";

    /// Heading of a supplied summary block
    pub const SUMMARY: &str = "🔮 Resumo da Leitura";
    /// Heading of a computed interpretation block
    pub const INTERPRETATION: &str = "📜 Interpretação da Tirada";
    /// Footer under a supplied summary
    pub const FREE_WILL: &str = "Confie na sabedoria das cartas, mas lembre-se: você tem o livre arbítrio para fazer suas escolhas.";
    /// Heading of the question view
    pub const YOUR_QUESTION: &str = "💭 Sua Pergunta";
    /// Heading of the search results list
    pub const SEARCH_RESULTS: &str = "📚 Resultados da Busca";
    /// Heading of the description block
    pub const DESCRIPTION: &str = "📖 Descrição";
    /// Heading of the upright meaning block
    pub const UPRIGHT_MEANING: &str = "✨ Sentido Reto";
    /// Heading of the reversed meaning block
    pub const REVERSED_MEANING: &str = "🌙 Sentido Invertido";
    /// Back affordance
    pub const BACK: &str = "← Voltar";
    /// Clear-search affordance
    pub const CLEAR: &str = "✕ Limpar";
    /// Advice annotation label
    pub const ADVICE: &str = "✨ Conselho";
    /// Context annotation label
    pub const CONTEXT: &str = "🌟 Contexto";
    /// Role annotation label
    pub const ROLE: &str = "Papel na leitura";

    /// Empty reading
    pub const NO_CARDS: &str = "😔 Nenhuma carta encontrada";
    /// Inline prompt for an empty question
    pub const TYPE_QUESTION: &str = "📝 Por favor, digite sua pergunta";
    /// Inline prompt for an empty search
    pub const SEARCH_PROMPT: &str = "🔍 Digite um termo para buscar significados";
    /// Search placeholder while a search is in flight
    pub const SEARCHING: &str = "🔮 Buscando cartas...";
    /// Hint under an empty search result
    pub const SEARCH_HINT: &str = "Tente outros termos ou seja mais específico";
    /// Hint under a truncated search result
    pub const REFINE_HINT: &str = "Seja mais específico para refinar a busca.";
    /// Uniform transport failure message
    pub const API_ERROR: &str = "🌋 Erro ao conectar com o tarot. Tente novamente.";
    /// Retry affordance
    pub const TRY_AGAIN: &str = "🔄 Tentar novamente";
}

/// Suggested search terms as `(icon, term)`
pub const SEARCH_SUGGESTIONS: &[(&str, &str)] = &[
    ("💕", "amor"),
    ("💼", "trabalho"),
    ("💰", "dinheiro"),
    ("🔄", "mudança"),
    ("🏆", "sucesso"),
];

/// Number of suggestions shown under an empty search result
pub const EMPTY_RESULT_SUGGESTIONS: usize = 4;

// ============================================================================
// Arcana
// ============================================================================

/// Card category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Arcana {
    /// One of the 22 named trumps
    Major,
    /// Suited, numbered and court cards
    #[default]
    Minor,
}

impl Arcana {
    /// Parse the backend's `type` field; anything other than `major` is minor
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("major") => Self::Major,
            _ => Self::Minor,
        }
    }

    /// Label with icon
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Major => "⭐ Arcano Maior",
            Self::Minor => "📜 Arcano Menor",
        }
    }
}

// ============================================================================
// Suit
// ============================================================================

/// Minor arcana suit
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Fire
    Wands,
    /// Water
    Cups,
    /// Air
    Swords,
    /// Earth
    Pentacles,
    /// A suit name the table does not know; kept verbatim
    Other(String),
}

impl Suit {
    /// Parse a suit name case-insensitively
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "wands" => Self::Wands,
            "cups" => Self::Cups,
            "swords" => Self::Swords,
            "pentacles" => Self::Pentacles,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Badge icon
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Wands => "⚡",
            Self::Cups => "💧",
            Self::Swords => "🗡️",
            Self::Pentacles => "💰",
            Self::Other(_) => GENERIC_SUIT_ICON,
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Wands => "Paus",
            Self::Cups => "Copas",
            Self::Swords => "Espadas",
            Self::Pentacles => "Ouros",
            Self::Other(raw) => raw,
        }
    }

    /// Element message used for a minor card's daily reading
    fn daily_element(&self) -> Option<&'static str> {
        match self {
            Self::Wands => Some("Hoje a energia do fogo traz criatividade e ação para sua vida."),
            Self::Cups => Some("As águas da emoção fluem hoje, trazendo sentimentos à tona."),
            Self::Swords => Some("O ar da razão sopra forte hoje, trazendo clareza mental."),
            Self::Pentacles => {
                Some("A terra da prosperidade se manifesta hoje em questões materiais.")
            }
            Self::Other(_) => None,
        }
    }
}

/// Icon for an unknown suit
pub const GENERIC_SUIT_ICON: &str = "📜";

/// Icon for a major arcana card
pub const MAJOR_ICON: &str = "⭐";

// ============================================================================
// Orientation
// ============================================================================

/// How a drawn card landed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Read with its upright meaning
    #[default]
    Upright,
    /// Read with its reversed meaning
    Reversed,
}

impl Orientation {
    /// Parse the backend's `position` field; unknown values yield `None`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "upright" => Some(Self::Upright),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Label with icon
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Upright => "✨ Reta",
            Self::Reversed => "🌙 Invertida",
        }
    }

    /// CSS class carried by the card element
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Upright => "upright",
            Self::Reversed => "reversed",
        }
    }

    /// Text colour class of the orientation label
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Upright => "text-green-400",
            Self::Reversed => "text-red-400",
        }
    }
}

// ============================================================================
// Spread Slots
// ============================================================================

/// Semantic slot of a card inside a spread
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpreadSlot {
    /// Three-card: past
    Past,
    /// Three-card: present
    Present,
    /// Three-card: future
    Future,
    /// Love: the querent
    You,
    /// Love: the partner
    Other,
    /// Love: the bond
    Relationship,
    /// Celtic cross: challenges
    Challenges,
    /// Celtic cross: potential
    Potential,
    /// Celtic cross: above
    Above,
    /// Celtic cross: below
    Below,
    /// Celtic cross: advice
    Advice,
    /// Celtic cross: external influences
    External,
    /// Celtic cross: hopes and fears
    Hopes,
    /// Celtic cross: outcome
    Outcome,
}

impl SpreadSlot {
    /// Parse either an English key or the Portuguese label the backend sends
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let slot = match raw.trim() {
            "past" | "Passado" => Self::Past,
            "present" | "Presente" => Self::Present,
            "future" | "Futuro" => Self::Future,
            "you" | "Você" => Self::You,
            "other" | "O Outro" => Self::Other,
            "relationship" | "A Relação" => Self::Relationship,
            "challenges" | "Desafios" => Self::Challenges,
            "potential" | "Potencial" => Self::Potential,
            "above" | "Acima" => Self::Above,
            "below" | "Abaixo" => Self::Below,
            "advice" | "Conselho" => Self::Advice,
            "external" | "Influências Externas" => Self::External,
            "hopes" | "Esperanças/Medos" => Self::Hopes,
            "outcome" | "Resultado" => Self::Outcome,
            _ => return None,
        };
        Some(slot)
    }

    /// Portuguese label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Past => "Passado",
            Self::Present => "Presente",
            Self::Future => "Futuro",
            Self::You => "Você",
            Self::Other => "O Outro",
            Self::Relationship => "A Relação",
            Self::Challenges => "Desafios",
            Self::Potential => "Potencial",
            Self::Above => "Acima",
            Self::Below => "Abaixo",
            Self::Advice => "Conselho",
            Self::External => "Influências Externas",
            Self::Hopes => "Esperanças/Medos",
            Self::Outcome => "Resultado",
        }
    }
}

/// Resolve a raw slot label for display, passing unknown labels through
#[must_use]
pub fn slot_label(raw: &str) -> String {
    SpreadSlot::parse(raw).map_or_else(|| raw.trim().to_string(), |slot| slot.label().to_string())
}

// ============================================================================
// Spread Narrative
// ============================================================================

/// Spread-level interpretation chosen by majority vote of orientations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Narrative {
    /// More upright than reversed cards
    Favorable,
    /// More reversed than upright cards
    Introspective,
    /// As many upright as reversed cards
    Balanced,
}

impl Narrative {
    /// Majority vote over two buckets; ties are balanced
    #[must_use]
    pub fn from_counts(upright: usize, reversed: usize) -> Self {
        match upright.cmp(&reversed) {
            std::cmp::Ordering::Greater => Self::Favorable,
            std::cmp::Ordering::Less => Self::Introspective,
            std::cmp::Ordering::Equal => Self::Balanced,
        }
    }

    /// Vote over a sequence of orientations
    pub fn from_orientations<I>(orientations: I) -> Self
    where
        I: IntoIterator<Item = Orientation>,
    {
        let (upright, reversed) =
            orientations
                .into_iter()
                .fold((0, 0), |(u, r), orientation| match orientation {
                    Orientation::Upright => (u + 1, r),
                    Orientation::Reversed => (u, r + 1),
                });
        Self::from_counts(upright, reversed)
    }

    /// Narrative text
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Favorable => "✨ A maioria das cartas está na posição reta, indicando um momento favorável para ação e crescimento. As energias estão fluindo positivamente.",
            Self::Introspective => "🌙 Há várias cartas invertidas, sugerindo a necessidade de introspecção e cuidado. Desafios podem estar presentes, mas trazem oportunidades de aprendizado.",
            Self::Balanced => "⚖️ Há um equilíbrio entre cartas retas e invertidas. Momentos de luz e sombra se alternam, trazendo oportunidades para integração e equilíbrio.",
        }
    }
}

// ============================================================================
// Daily Messages
// ============================================================================

/// Message shown under the card of the day
///
/// `lookup_name` is the card's untranslated name (the table is keyed on it);
/// `display_name` is what the templates interpolate.
#[must_use]
pub fn daily_message(
    lookup_name: &str,
    display_name: &str,
    arcana: Arcana,
    suit: Option<&Suit>,
) -> String {
    if let Some(message) = named_daily_message(lookup_name.trim()) {
        return message.to_string();
    }

    match (arcana, suit) {
        (Arcana::Major, _) => format!(
            "Hoje o arcano {display_name} traz sua energia poderosa para seu dia. Reflita sobre seus significados e como eles se aplicam à sua vida."
        ),
        (Arcana::Minor, Some(suit)) => suit.daily_element().map_or_else(
            || format!("A energia de {display_name} se apresenta hoje em sua vida."),
            ToString::to_string,
        ),
        (Arcana::Minor, None) => format!(
            "Sua carta para hoje é {display_name}. Medite sobre sua mensagem e como ela se aplica ao seu momento."
        ),
    }
}

#[allow(clippy::too_many_lines)]
fn named_daily_message(name: &str) -> Option<&'static str> {
    let message = match name {
        "The Fool" => "Hoje é dia de dar um salto de fé! O Louco te convida a embarcar em uma nova aventura com coração aberto.",
        "The Magician" => "Seu poder de manifestação está no auge! Use suas habilidades para criar a realidade que deseja.",
        "The High Priestess" => "Confie na sua intuição. Os mistérios do universo estão se revelando para você hoje.",
        "The Empress" => "A energia da abundância te cerca. Cultive amor, criatividade e conexão com a natureza.",
        "The Emperor" => "Estrutura e autoridade são necessárias hoje. Organize-se e lidere com sabedoria.",
        "The Hierophant" => "Busque conhecimento e tradição. Um mentor ou ensinamento importante pode aparecer.",
        "The Lovers" => "Escolhas do coração estão em foco. Siga seu verdadeiro desejo, não apenas a razão.",
        "The Chariot" => "Determinação e controle te levarão à vitória. Mantenha o foco no seu objetivo.",
        "Strength" => "A verdadeira força vem da compaixão. Enfrente desafios com gentileza e coragem.",
        "The Hermit" => "Momento de introspecção. A solidão hoje traz sabedoria e autoconhecimento.",
        "Wheel of Fortune" => "Mudanças estão a caminho! A roda da fortuna gira e traz novas oportunidades.",
        "Justice" => "Equilíbrio e verdade prevalecem. Suas ações de hoje terão consequências justas.",
        "The Hanged Man" => "Olhe de outra perspectiva. A rendição pode trazer a resposta que você busca.",
        "Death" => "Transformação profunda. Algo precisa morrer para que o novo possa nascer.",
        "Temperance" => "Equilíbrio é a chave. Encontre o meio-termo e integre opostos em harmonia.",
        "The Devil" => "Liberte-se das amarras. Identifique o que te prende e busque sua liberdade.",
        "The Tower" => "Mudança repentina. O que parece caótico hoje é na verdade uma libertação necessária.",
        "The Star" => "Esperança e inspiração. O universo te envia sinais de que dias melhores virão.",
        "The Moon" => "Navegue pelas ilusões. Sua intuição é mais confiável que a lógica hoje.",
        "The Sun" => "Alegria e sucesso! Um dia radiante te espera, cheio de otimismo e realizações.",
        "Judgement" => "Chamado interior. É hora de ouvir sua alma e se libertar do passado.",
        "The World" => "Ciclo completo! Celebre suas conquistas e prepare-se para um novo começo.",

        "Ace of Wands" => "Nova energia criativa surge! Um projeto ou paixão está pronto para começar.",
        "Two of Wands" => "Planeje seu próximo passo. O mundo está diante de você, escolha com sabedoria.",
        "Three of Wands" => "Seus esforços começam a dar frutos. A expansão está a caminho.",
        "Four of Wands" => "Celebração e harmonia no lar. Momento de comemorar conquistas.",
        "Five of Wands" => "Conflitos e competição. Busque o meio-termo nas discussões de hoje.",
        "Six of Wands" => "Vitória e reconhecimento! Seu talento será notado e aplaudido.",
        "Seven of Wands" => "Defenda suas ideias. Desafios aparecem, mas você tem força para vencê-los.",
        "Eight of Wands" => "Ação rápida e progresso. Notícias chegam e tudo se acelera.",
        "Nine of Wands" => "Resiliência é a chave. Você está quase lá, não desista agora.",
        "Ten of Wands" => "Sobrecarga de responsabilidades. Peça ajuda e delegue tarefas.",
        "Page of Wands" => "Notícias empolgantes chegam. Uma nova oportunidade criativa aparece.",
        "Knight of Wands" => "Ação e aventura! Siga seus impulsos com paixão e entusiasmo.",
        "Queen of Wands" => "Confiança e calor humano. Sua autenticidade atrai boas energias.",
        "King of Wands" => "Liderança visionária. Use sua influência para inspirar outros.",

        "Ace of Cups" => "Novo amor ou emoção profunda. Seu coração se abre para receber.",
        "Two of Cups" => "Conexão especial. Um encontro significativo ou parceria amorosa.",
        "Three of Cups" => "Amizade e celebração. Momento de confraternizar com pessoas queridas.",
        "Four of Cups" => "Insatisfação ou apatia. Olhe ao redor, talvez você esteja ignorando bênçãos.",
        "Five of Cups" => "Foco na perda. Não se esqueça do que ainda permanece com você.",
        "Six of Cups" => "Nostalgia e memórias. O passado traz conforto ou lições importantes.",
        "Seven of Cups" => "Muitas escolhas e ilusões. Cuidado com fantasias, busque clareza.",
        "Eight of Cups" => "Deixar para trás. É hora de seguir em frente emocionalmente.",
        "Nine of Cups" => "Realização de desejos! Seu pedido será atendido em breve.",
        "Ten of Cups" => "Felicidade familiar e plenitude. Harmonia completa no amor.",
        "Page of Cups" => "Mensagem de amor ou criatividade. Um convite romântico ou artístico.",
        "Knight of Cups" => "Romance e idealismo. Alguém pode fazer uma declaração de sentimentos.",
        "Queen of Cups" => "Intuição e compaixão. Ouça sua voz interior com carinho.",
        "King of Cups" => "Equilíbrio emocional e maturidade. Controle suas emoções com sabedoria.",

        "Ace of Swords" => "Clareza mental! Uma ideia brilhante ou verdade importante se revela.",
        "Two of Swords" => "Indecisão. Você precisa fazer uma escolha, mesmo sendo difícil.",
        "Three of Swords" => "Dor e sofrimento. Permita-se sentir, a cura virá depois.",
        "Four of Swords" => "Descanso necessário. Faça uma pausa para recuperar energias.",
        "Five of Swords" => "Conflito e derrota. Escolha suas batalhas, nem todas valem a pena.",
        "Six of Swords" => "Transição tranquila. Deixando dificuldades para trás, rumo à paz.",
        "Seven of Swords" => "Estratégia e discrição. Às vezes é melhor não revelar todos os planos.",
        "Eight of Swords" => "Sentindo-se preso. As amarras são mais mentais que reais.",
        "Nine of Swords" => "Ansiedade e preocupação. A mente cria monstros, busque tranquilidade.",
        "Ten of Swords" => "Fim de um ciclo difícil. O pior já passou, o recomeço está próximo.",
        "Page of Swords" => "Curiosidade e vigilância. Busque informações, mas evite fofocas.",
        "Knight of Swords" => "Ação rápida e direta. Comunique-se com clareza e objetividade.",
        "Queen of Swords" => "Independência e sabedoria. Corte o que não serve com honestidade.",
        "King of Swords" => "Autoridade intelectual. Use a lógica e a verdade para decidir.",

        "Ace of Pentacles" => "Nova oportunidade material! Prosperidade e abundância chegando.",
        "Two of Pentacles" => "Equilíbrio financeiro. Gerencie múltiplas prioridades com leveza.",
        "Three of Pentacles" => "Trabalho em equipe. Colabore e aprenda com outros.",
        "Four of Pentacles" => "Apego e segurança. Cuidado com a avareza, compartilhe.",
        "Five of Pentacles" => "Dificuldade material. Momentos difíceis, mas temporários.",
        "Six of Pentacles" => "Generosidade e partilha. Dar e receber em equilíbrio.",
        "Seven of Pentacles" => "Paciência e cultivo. Seus esforços darão frutos com tempo.",
        "Eight of Pentacles" => "Dedicação ao trabalho. Aperfeiçoe suas habilidades com esmero.",
        "Nine of Pentacles" => "Independência financeira. Desfrute do que conquistou com orgulho.",
        "Ten of Pentacles" => "Legado e família. Prosperidade que atravessa gerações.",
        "Page of Pentacles" => "Estudo e aprendizado. Invista em conhecimento prático.",
        "Knight of Pentacles" => "Trabalho constante. Passo a passo, com paciência e método.",
        "Queen of Pentacles" => "Nutrição e conforto. Cuide do lar e das finanças com carinho.",
        "King of Pentacles" => "Segurança e abundância. Liderança prática e confiável.",

        _ => return None,
    };
    Some(message)
}
